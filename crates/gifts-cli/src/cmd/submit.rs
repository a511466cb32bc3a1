use crate::output::{print_json, Table};
use anyhow::{bail, Context};
use gifts_core::answers::AnswerSet;
use gifts_core::catalog::Catalog;
use gifts_core::engine::Engine;
use gifts_core::result::QuizResult;
use gifts_core::session::{Intent, Step};
use gifts_core::store::{FsPlanStore, FsResultStore};
use std::collections::BTreeMap;
use std::path::Path;

pub fn run(
    root: &Path,
    name: &str,
    email: &str,
    answers_file: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = Catalog::standard();

    let data = std::fs::read_to_string(answers_file)
        .with_context(|| format!("failed to read {}", answers_file.display()))?;
    let raw: BTreeMap<u32, u8> =
        serde_yaml::from_str(&data).context("answers file must map question id to rating")?;

    // Validate everything up front so a bad file fails before any state moves.
    let mut answers = AnswerSet::new();
    for (&id, &rating) in &raw {
        if catalog.question(id).is_none() {
            bail!("answers file references unknown question id {id}");
        }
        answers
            .record(id, rating)
            .with_context(|| format!("question {id}"))?;
    }

    let mut engine = Engine::new(
        catalog,
        FsResultStore::new(root),
        FsPlanStore::new(root),
    );

    engine.handle(Intent::StartQuiz);
    engine.handle(Intent::Identify {
        name: name.to_string(),
        email: email.to_string(),
    });
    if let Some(message) = engine.session().identify_error {
        bail!("{message}");
    }

    for (question_id, rating) in answers.iter() {
        engine.handle(Intent::Answer {
            question_id,
            rating,
        });
    }
    for _ in 1..engine.catalog().total_pages() {
        engine.handle(Intent::NextPage);
    }
    engine.handle(Intent::Submit);

    if engine.session().step != Step::Results {
        let message = engine
            .session()
            .page_warning
            .unwrap_or("submission was refused");
        bail!("{message}");
    }

    let Some(result) = engine.session().result.as_ref() else {
        bail!("submission produced no result");
    };

    // Fail-open: a persistence problem is a warning, not a failure.
    if let Some(save_error) = &result.save_error {
        eprintln!("warning: {save_error}");
    }

    if json {
        return print_json(result);
    }
    print_result(result);
    Ok(())
}

pub fn print_result(result: &QuizResult) {
    println!("Results for {} <{}>\n", result.name, result.email);

    let top_ids: Vec<&str> = result.top_gifts.iter().map(|g| g.gift.id.as_str()).collect();
    let mut table = Table::new(&["GIFT", "SCORE", "TOP"]);
    for s in &result.all_scores {
        let marker = if top_ids.contains(&s.gift.id.as_str()) {
            "*"
        } else {
            ""
        };
        table.row(vec![
            s.gift.name.clone(),
            s.score.to_string(),
            marker.to_string(),
        ]);
    }
    table.print();

    let top_names: Vec<&str> = result.top_gifts.iter().map(|g| g.gift.name.as_str()).collect();
    println!("\nTop gifts: {}", top_names.join(", "));
}
