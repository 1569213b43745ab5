mod bootstrap;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use planner_core::chat::{plan_ready_notice, ChatMessage};
use planner_core::models::{DemographicCategory, MediaPlan};
use planner_core::settings::Settings;
use planner_core::wizard::{WizardSession, WizardStep};
use planner_data::query::PlanFilter;
use planner_data::store::PlanStore;
use planner_runtime::assistant::{AssistantEvent, AssistantRuntime};
use planner_ui::app::App;
use planner_ui::plan_detail::format_summary;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(
        &settings.log_level,
        settings.log_file.as_ref(),
        settings.is_tui_view(),
    )?;

    tracing::info!("Media Planner v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Policy: {}",
        settings.view,
        settings.theme,
        settings.policy
    );

    if settings.clear {
        println!("Saved configuration cleared.");
    }

    let mut store = PlanStore::open(settings.store_path());

    match settings.view.as_str() {
        "list" => {
            let filter = PlanFilter::new(
                settings.search.clone().unwrap_or_default(),
                settings.status_filter(),
            );
            let app = App::new(&settings.theme, store, filter, settings.edit_policy());
            app.run()?;
        }

        "budget" => {
            let id = require_plan_id(&settings)?;
            let mut app = App::new(
                &settings.theme,
                store,
                PlanFilter::default(),
                settings.edit_policy(),
            );
            app.open_budget(id)
                .with_context(|| format!("cannot open the budget editor for plan {}", id))?;
            app.run()?;
        }

        "chat" => run_chat(&mut store).await?,

        "create" => {
            let (plan, notice) = create_plan(&settings)?;
            store.upsert(plan.clone())?;
            notice.log();
            println!("{}", notice.text());
            println!("Plan id: {}\n", plan.id);
            print!("{}", format_summary(&plan));
        }

        "summary" => {
            let id = require_plan_id(&settings)?;
            let plan = store.require(id)?;
            print!("{}", format_summary(plan));
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}

fn require_plan_id(settings: &Settings) -> Result<&str> {
    match settings.plan_id.as_deref() {
        Some(id) => Ok(id),
        None => bail!("--plan-id is required for the {} view", settings.view),
    }
}

// ── Create view ────────────────────────────────────────────────────────────────

/// Drive a wizard session from the creation flags.
///
/// Channels and regions left empty are filled with the recommendations when
/// the wizard reaches those steps.
fn create_plan(settings: &Settings) -> Result<(MediaPlan, planner_core::Notice)> {
    let mut wizard = WizardSession::new(settings.edit_policy());

    wizard.set_client_name(settings.client.clone().unwrap_or_default());
    if let Some(product_type) = settings.product_type {
        wizard.set_product_type(product_type);
    }
    if let Some(industry) = settings.industry {
        wizard.set_industry(industry);
    }
    for goal in &settings.goals {
        wizard.toggle_kpi_goal(*goal);
    }
    wizard.set_country(settings.country);
    wizard.set_start_date(settings.start);
    wizard.set_end_date(settings.end);

    if !settings.channels.is_empty() {
        wizard.set_channels(settings.channels.clone());
    }
    for region in &settings.regions {
        let notice = wizard.toggle_region(*region);
        tracing::debug!("{}", notice.text());
    }
    let demographics = [
        (DemographicCategory::AgeRanges, &settings.ages),
        (DemographicCategory::Genders, &settings.genders),
        (DemographicCategory::Income, &settings.income),
        (DemographicCategory::Interests, &settings.interests),
    ];
    for (category, values) in demographics {
        for value in values {
            if !category.options().contains(&value.as_str()) {
                tracing::warn!(value = %value, "ignoring unknown {:?} option", category);
                continue;
            }
            if !wizard.toggle_demographic(category, value) {
                // Repeated value on the command line; keep it selected.
                wizard.toggle_demographic(category, value);
            }
        }
    }
    if let Some(description) = &settings.description {
        wizard.set_description(description.clone());
    }

    while wizard.step() != WizardStep::Summary {
        if wizard.step() == WizardStep::Budget {
            if let Some(total) = settings.total {
                if let Some(notice) = wizard.set_total_budget(total)? {
                    notice.log();
                }
            }
        }
        wizard.next().context("cannot create the media plan")?;
    }

    Ok(if settings.submit {
        wizard.send_for_approval()
    } else {
        wizard.save_as_draft()
    })
}

// ── Chat view ──────────────────────────────────────────────────────────────────

fn print_assistant(message: &ChatMessage) {
    if message.is_view_plan_action() {
        println!("Assistant: Your plan is ready. Type /view to open it.");
    } else {
        println!("Assistant: {}", message.content);
    }
}

/// Line-mode conversation with the scripted assistant.
///
/// `/view` saves the proposed plan as a draft and prints it; `/quit` or
/// end of input leaves without saving.
async fn run_chat(store: &mut PlanStore) -> Result<()> {
    let (tx, mut events, handle) = AssistantRuntime::default().start();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut proposal: Option<MediaPlan> = None;

    println!("Describe your campaign. /view opens the proposed plan, /quit exits.\n");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(AssistantEvent::Typing(true)) => println!("Assistant is typing..."),
                Some(AssistantEvent::Typing(false)) => {}
                Some(AssistantEvent::Message(message)) => print_assistant(&message),
                Some(AssistantEvent::PlanReady(plan)) => proposal = Some(*plan),
                None => break,
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = line.trim().to_owned();
                match command.as_str() {
                    "/quit" => break,
                    "/view" => match proposal.take() {
                        Some(plan) => {
                            store.upsert(plan.clone())?;
                            let notice = plan_ready_notice();
                            notice.log();
                            println!("{}\n", notice.text());
                            print!("{}", format_summary(&plan));
                            break;
                        }
                        None => println!("No media plan is ready yet."),
                    },
                    _ => {
                        if tx.send(line).await.is_err() {
                            break;
                        }
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received; leaving chat");
                break;
            }
        }
    }

    handle.abort();
    Ok(())
}
