//! The `laborcheck questions` command.

use anyhow::Result;
use laborcheck_core::error::DiagnosisError;

use super::{question_line, Session};

pub fn execute(session: &Session, category: Option<usize>) -> Result<()> {
    let nav = session.navigator();
    let schema = nav.schema();

    let categories: Vec<_> = match category {
        Some(id) => vec![schema
            .category(id)
            .ok_or(DiagnosisError::UnknownCategory(id))?],
        None => schema.categories().iter().collect(),
    };

    for c in categories {
        println!("== {} {} (가중치 {}) ==", c.id, c.name, c.weight);
        for q in schema.questions_in(c.id) {
            let answer = nav.answers().get(q.index).map(|a| a.code());
            println!("{}", question_line(q, answer));
        }
        println!();
    }

    Ok(())
}
