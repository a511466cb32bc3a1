use crate::output::{print_json, Table};
use gifts_core::catalog::Catalog;

pub fn questions(json: bool) -> anyhow::Result<()> {
    let catalog = Catalog::standard();
    if json {
        return print_json(&catalog.questions());
    }
    let mut table = Table::new(&["ID", "QUESTION"]).wrap_last(64);
    for q in catalog.questions() {
        table.row(vec![q.id.to_string(), q.text.clone()]);
    }
    table.print();
    println!(
        "\n{} questions, {} per page, {} pages",
        catalog.questions().len(),
        catalog.page_size(),
        catalog.total_pages()
    );
    Ok(())
}

pub fn gifts(json: bool) -> anyhow::Result<()> {
    let catalog = Catalog::standard();
    if json {
        return print_json(&catalog.gifts());
    }
    let mut table = Table::new(&["ID", "NAME", "QUESTIONS", "DESCRIPTION"]).wrap_last(48);
    for g in catalog.gifts() {
        let qids = g
            .questions
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join(",");
        table.row(vec![
            g.id.clone(),
            g.name.clone(),
            qids,
            g.description.clone(),
        ]);
    }
    table.print();
    Ok(())
}
