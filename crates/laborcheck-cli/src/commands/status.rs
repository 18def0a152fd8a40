//! The `laborcheck status` command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use laborcheck_core::profile::load_profile;

use super::Session;

pub fn execute(session: &Session) -> Result<()> {
    let nav = session.navigator();
    let schema = nav.schema();

    if let Some(profile) = load_profile(&session.storage) {
        println!("사업장: {}", profile.name);
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Category", "Weight", "Answered", "Done"]);

    for (category, done) in schema.categories().iter().zip(nav.category_completion()) {
        let indices = schema.question_indices(category.id);
        let answered = indices
            .iter()
            .filter(|&&i| nav.answers().get(i).is_some())
            .count();
        table.add_row(vec![
            Cell::new(category.id),
            Cell::new(&category.name),
            Cell::new(category.weight),
            Cell::new(format!("{answered}/{}", indices.len())),
            Cell::new(if done { "✓" } else { "" }),
        ]);
    }

    println!("{table}");
    println!(
        "\n{}/{} answered ({}%), current question #{}",
        nav.answered_count(),
        schema.question_count(),
        nav.progress(),
        nav.current_index()
    );
    if nav.can_finish() {
        println!("Ready: run `laborcheck result`.");
    }

    Ok(())
}
