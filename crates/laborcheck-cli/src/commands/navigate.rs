//! Session commands: `start`, `show`, `answer`, `set`, `next`, `prev`, `goto`.

use anyhow::Result;
use laborcheck_core::model::AnswerValue;
use laborcheck_core::navigation::Navigator;
use laborcheck_core::storage::Storage;

use super::Session;

pub fn start(session: &Session) -> Result<()> {
    let mut nav = session.navigator();
    nav.start_new();
    println!(
        "Started a new diagnosis ({} questions).\n",
        session.schema.question_count()
    );
    print_current(&nav);
    Ok(())
}

pub fn show(session: &Session) -> Result<()> {
    print_current(&session.navigator());
    Ok(())
}

pub fn answer(session: &Session, value: AnswerValue) -> Result<()> {
    let mut nav = session.navigator();
    let answered = nav.current_index();
    let was_last = nav.is_last();
    nav.answer_current(value)?;
    println!("#{answered} → {value}\n");

    if was_last && nav.can_finish() {
        println!("All questions answered. Run `laborcheck result` to see the diagnosis.");
    } else if was_last {
        println!(
            "Last question answered, {} still unanswered. Use `laborcheck status` to find them.",
            session.schema.question_count() - nav.answered_count()
        );
    } else {
        print_current(&nav);
    }
    Ok(())
}

pub fn set(session: &Session, index: usize, value: AnswerValue) -> Result<()> {
    let mut nav = session.navigator();
    nav.set_answer(index, value)?;
    println!(
        "#{index} → {value} ({}/{} answered)",
        nav.answered_count(),
        session.schema.question_count()
    );
    Ok(())
}

pub fn next(session: &Session) -> Result<()> {
    let mut nav = session.navigator();
    if nav.is_last() {
        println!("Already at the last question.\n");
    }
    nav.next();
    print_current(&nav);
    Ok(())
}

pub fn prev(session: &Session) -> Result<()> {
    let mut nav = session.navigator();
    if nav.is_first() {
        println!("Already at the first question.\n");
    }
    nav.previous();
    print_current(&nav);
    Ok(())
}

pub fn goto(session: &Session, index: Option<usize>, category: Option<usize>) -> Result<()> {
    let mut nav = session.navigator();
    match (index, category) {
        (_, Some(id)) => nav.jump_to_category(id)?,
        (Some(i), None) => nav.jump_to(i)?,
        (None, None) => anyhow::bail!("give a question index or --category"),
    };
    print_current(&nav);
    Ok(())
}

fn print_current<S: Storage>(nav: &Navigator<'_, S>) {
    let schema = nav.schema();
    let question = nav.current_question();
    let category = schema
        .category(question.category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("?");
    let (ordinal, count) = nav.position_in_category();

    println!(
        "[{category} {ordinal}/{count}] 문항 {}/{} · 진행률 {}%",
        question.index + 1,
        schema.question_count(),
        nav.progress()
    );
    println!("#{} {}", question.index, question.text);

    let options: Vec<String> = question
        .options
        .iter()
        .map(|o| {
            if nav.current_answer() == Some(*o) {
                format!("[{}]", o.code())
            } else {
                o.code().to_string()
            }
        })
        .collect();
    println!("  {}", options.join(" / "));
}
