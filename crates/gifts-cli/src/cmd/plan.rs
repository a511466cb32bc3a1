use crate::output::{print_json, Table};
use anyhow::bail;
use clap::Subcommand;
use gifts_core::catalog::Catalog;
use gifts_core::engine::Engine;
use gifts_core::plan::{DevelopmentPlan, PlanCategoryPatch, PlanField};
use gifts_core::session::{Intent, Step};
use gifts_core::store::{FsPlanStore, FsResultStore};
use std::path::Path;
use std::str::FromStr;

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Show the development plan for an email
    Show {
        #[arg(long)]
        email: String,
    },

    /// List the editable plan fields
    Fields,

    /// Set one free-text plan field and save
    Set {
        #[arg(long)]
        email: String,
        /// Field name as listed by `plan fields`
        #[arg(long)]
        field: String,
        #[arg(long)]
        value: String,
    },

    /// Set the gift category flags and save
    Category {
        #[arg(long)]
        email: String,
        #[arg(long)]
        numeric: Option<bool>,
        #[arg(long)]
        maturity: Option<bool>,
        #[arg(long)]
        organic: Option<bool>,
    },
}

pub fn run(root: &Path, subcommand: PlanSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        PlanSubcommand::Show { email } => show(root, &email, json),
        PlanSubcommand::Fields => fields(json),
        PlanSubcommand::Set {
            email,
            field,
            value,
        } => {
            let field = PlanField::from_str(&field)?;
            edit(root, &email, json, |engine| {
                engine.handle(Intent::EditPlan { field, value });
            })
        }
        PlanSubcommand::Category {
            email,
            numeric,
            maturity,
            organic,
        } => edit(root, &email, json, |engine| {
            engine.handle(Intent::PatchPlanCategories(PlanCategoryPatch {
                numeric,
                maturity,
                organic,
            }));
        }),
    }
}

type FsEngine = Engine<FsResultStore, FsPlanStore>;

/// Identify by email and land on the development guide with the plan loaded,
/// or fail with the same message the session surfaces.
fn open_guide(root: &Path, email: &str) -> anyhow::Result<FsEngine> {
    let mut engine = Engine::new(
        Catalog::standard(),
        FsResultStore::new(root),
        FsPlanStore::new(root),
    );
    engine.handle(Intent::StartDevelopment);
    engine.handle(Intent::IdentifyForPlan {
        email: email.to_string(),
    });

    let s = engine.session();
    if let Some(message) = s.identify_error {
        bail!("{message}");
    }
    if let Some(message) = s.plan_load_error {
        bail!("{message}");
    }
    if s.step != Step::DevelopmentGuide {
        bail!("could not open the development guide");
    }
    Ok(engine)
}

fn show(root: &Path, email: &str, json: bool) -> anyhow::Result<()> {
    let engine = open_guide(root, email)?;
    let Some(plan) = engine.session().plan.as_ref() else {
        bail!("no plan is available");
    };

    if json {
        return print_json(plan);
    }
    print_plan(plan, &engine.session().name, email);
    Ok(())
}

fn edit(
    root: &Path,
    email: &str,
    json: bool,
    apply: impl FnOnce(&mut FsEngine),
) -> anyhow::Result<()> {
    let mut engine = open_guide(root, email)?;
    apply(&mut engine);
    engine.handle(Intent::SavePlan);

    let s = engine.session();
    if let Some(message) = s.plan_save_error {
        bail!("{message}");
    }
    let Some(plan) = s.plan.as_ref() else {
        bail!("no plan is available");
    };

    if json {
        return print_json(plan);
    }
    println!("Saved plan for {email}");
    Ok(())
}

fn fields(json: bool) -> anyhow::Result<()> {
    if json {
        let names: Vec<&str> = PlanField::all().iter().map(|f| f.as_str()).collect();
        return print_json(&names);
    }
    for field in PlanField::all() {
        println!("{field}");
    }
    Ok(())
}

fn print_plan(plan: &DevelopmentPlan, name: &str, email: &str) {
    println!("Development plan for {name} <{email}>\n");

    let mut table = Table::new(&["FIELD", "VALUE"]).wrap_last(56);
    for &f in PlanField::all() {
        table.row(vec![f.to_string(), plan.get(f).to_string()]);
    }
    table.row(vec![
        "categories".to_string(),
        format!(
            "numeric={} maturity={} organic={}",
            plan.categories.numeric, plan.categories.maturity, plan.categories.organic
        ),
    ]);
    table.print();

    if let Some(at) = plan.last_updated {
        println!("\nLast updated: {}", at.format("%Y-%m-%d %H:%M UTC"));
    }
}
