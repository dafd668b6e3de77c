//! Wizard Driver
//!
//! Interactive terminal front end for the wizard controller. Renders each
//! step with dialoguer prompts, records the selection, and on completion
//! submits it to the generation service exactly once.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, MultiSelect, Select};
use tracing::info;

use crate::catalog::TemplateCatalog;
use crate::types::{
    GenerationClient, GenerationOutcome, GenerationResult, ResultPresenter, WizardSelection,
};
use crate::wizard::controller::{Advance, WizardController, WizardStep};

const TOTAL_STEPS: usize = 4;

/// What the user did with the prompt for one step.
enum StepAction {
    Selected,
    Back,
}

/// Run the wizard end to end: prompt through all four steps, generate,
/// and present the result. Offers a fresh pass when generation fails.
pub async fn run_wizard(
    catalog: &TemplateCatalog,
    client: &dyn GenerationClient,
    presenter: &dyn ResultPresenter,
) -> Result<()> {
    anyhow::ensure!(
        !catalog.is_empty(),
        "no template descriptors could be loaded; there is nothing to select from"
    );

    println!();
    println!("{}", "  Let's design your website.".white());

    loop {
        let selection = collect_selection(catalog)?;
        let result = submit(&selection, client, presenter).await;

        match result.outcome() {
            GenerationOutcome::Failed(_) => {
                let again = Confirm::new()
                    .with_prompt("Start over with a new design?")
                    .default(false)
                    .interact()?;
                if !again {
                    return Ok(());
                }
            }
            _ => {
                if result.download_url.is_some() {
                    let fetch = Confirm::new()
                        .with_prompt("Download the generated website now?")
                        .default(true)
                        .interact()?;
                    if fetch {
                        presenter.download(&result).await?;
                    }
                }
                return Ok(());
            }
        }
    }
}

/// Submit a completed selection: a single generation call, its result
/// forwarded to the presenter.
pub async fn submit(
    selection: &WizardSelection,
    client: &dyn GenerationClient,
    presenter: &dyn ResultPresenter,
) -> GenerationResult {
    info!(
        "Submitting design for generation (type: {})",
        selection.template_type.as_deref().unwrap_or("?")
    );
    println!();
    println!("{}", "  Generating your website design...".cyan());

    let result = client.generate(selection).await;
    presenter.present(&result);
    result
}

/// Drive one controller from the first step to completion.
fn collect_selection(catalog: &TemplateCatalog) -> Result<WizardSelection> {
    let mut controller = WizardController::new();

    loop {
        let step = controller.current_step();
        print_step_header(step);

        let action = match step {
            WizardStep::SiteType => prompt_site_type(catalog, &mut controller)?,
            WizardStep::Pages => prompt_pages(catalog, &mut controller)?,
            WizardStep::Theme => prompt_theme(catalog, &mut controller)?,
            WizardStep::Features => prompt_features(catalog, &mut controller)?,
            // advance() moves us off the board before we can land here.
            WizardStep::Complete => StepAction::Selected,
        };

        match action {
            StepAction::Back => {
                controller.retreat();
            }
            StepAction::Selected => match controller.advance() {
                Ok(Advance::Complete(selection)) => return Ok(selection),
                Ok(Advance::Next(_)) => {}
                Err(e) => {
                    // Validation failures re-prompt the same step.
                    println!("{}", format!("  {}", e).yellow());
                }
            },
        }
    }
}

fn print_step_header(step: WizardStep) {
    println!();
    println!(
        "{}",
        format!("  [{}/{}] {}", step.number(), TOTAL_STEPS, step.title()).cyan()
    );
}

fn prompt_site_type(
    catalog: &TemplateCatalog,
    controller: &mut WizardController,
) -> Result<StepAction> {
    let types = catalog.types().to_vec();
    let index = Select::new()
        .with_prompt("  Choose a website type")
        .items(&types)
        .default(0)
        .interact()?;

    controller.select_site_type(types[index].clone())?;
    Ok(StepAction::Selected)
}

fn prompt_pages(
    catalog: &TemplateCatalog,
    controller: &mut WizardController,
) -> Result<StepAction> {
    let site_type = current_type(controller);
    let pages = catalog.pages(&site_type).to_vec();

    let labels: Vec<String> = pages.iter().map(|p| p.name.clone()).collect();
    let defaults: Vec<bool> = pages.iter().map(|p| p.default).collect();

    let chosen = MultiSelect::new()
        .with_prompt("  Select the pages to include (Space toggles, Enter confirms)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    if chosen.is_empty() {
        let back = Confirm::new()
            .with_prompt("No pages selected. Go back to the website type?")
            .default(false)
            .interact()?;
        if back {
            return Ok(StepAction::Back);
        }
    }

    let ids: Vec<String> = chosen.iter().map(|&i| pages[i].id.clone()).collect();
    controller.select_pages(ids)?;
    Ok(StepAction::Selected)
}

fn prompt_theme(
    catalog: &TemplateCatalog,
    controller: &mut WizardController,
) -> Result<StepAction> {
    let site_type = current_type(controller);
    let themes = catalog.themes(&site_type).to_vec();

    let mut labels: Vec<String> = themes.iter().map(|t| t.label.clone()).collect();
    labels.push("\u{2190} Back".to_string());

    let index = Select::new()
        .with_prompt("  Choose a color theme")
        .items(&labels)
        .default(0)
        .interact()?;

    if index == themes.len() {
        return Ok(StepAction::Back);
    }

    controller.select_theme(themes[index].id.clone())?;
    Ok(StepAction::Selected)
}

fn prompt_features(
    catalog: &TemplateCatalog,
    controller: &mut WizardController,
) -> Result<StepAction> {
    let site_type = current_type(controller);
    let features = catalog.features(&site_type).to_vec();

    let ids: Vec<String> = if features.is_empty() {
        Vec::new()
    } else {
        let labels: Vec<String> = features.iter().map(|f| f.label.clone()).collect();
        let chosen = MultiSelect::new()
            .with_prompt("  Pick optional features (none is fine)")
            .items(&labels)
            .interact()?;
        chosen.iter().map(|&i| features[i].id.clone()).collect()
    };

    controller.select_features(ids)?;
    print_selection_summary(controller.selection());

    let proceed = Confirm::new()
        .with_prompt("Generate the website with these selections?")
        .default(true)
        .interact()?;

    if proceed {
        Ok(StepAction::Selected)
    } else {
        Ok(StepAction::Back)
    }
}

fn print_selection_summary(selection: &WizardSelection) {
    println!();
    println!(
        "{}",
        format!(
            "  Type: {}  Pages: {}  Theme: {}  Features: {}",
            selection.template_type.as_deref().unwrap_or("?"),
            selection.selected_pages.join(", "),
            selection.selected_theme.as_deref().unwrap_or("?"),
            if selection.selected_features.is_empty() {
                "none".to_string()
            } else {
                selection.selected_features.join(", ")
            }
        )
        .dimmed()
    );
}

fn current_type(controller: &WizardController) -> String {
    controller
        .selection()
        .template_type
        .clone()
        .unwrap_or_default()
}
