use crate::repl::{ChatHelper, SlashCommand, parse_command};
use anyhow::Result;
use colored::Colorize;
use counsel_application::{CounselUseCase, TurnOutcome};
use counsel_core::agent::Agent;
use counsel_core::report::Report;
use counsel_core::session::{RoutineKind, Turn};
use counsel_interaction::OpenAIApiAgent;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use std::path::Path;
use std::sync::Arc;

const HELP: &str = "/trigger [주제]  다음 턴에 롤플레잉 시작\n\
                    /title           세션 제목 생성\n\
                    /status          시나리오 슬롯과 진행 상태\n\
                    /end             세션 종료 및 보고서 출력";

pub async fn run(config_path: Option<&Path>, topic: Option<String>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let agent: Arc<dyn Agent> = Arc::new(OpenAIApiAgent::try_from_env()?);
    let usecase = CounselUseCase::load(agent, &config).await?;

    let session_id = usecase.start_session().await?;
    tracing::debug!(%session_id, templates = usecase.catalog().len(), "Chat session ready");
    if topic.is_some() {
        usecase.trigger_rehearsal(&session_id, topic).await?;
    }

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ChatHelper));

    println!("{}", "=== Counsel ===".bright_magenta().bold());
    println!(
        "{}",
        "편하게 이야기해 주세요. '/help'로 명령어를, '/end'로 세션을 마칠 수 있어요.".bright_black()
    );
    println!();

    loop {
        match rl.readline("나 > ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match parse_command(trimmed) {
                    Some(SlashCommand::End) => break,
                    Some(SlashCommand::Help) => println!("{}", HELP.bright_black()),
                    Some(SlashCommand::Trigger(topic)) => {
                        usecase.trigger_rehearsal(&session_id, topic).await?;
                        println!("{}", "다음 발화에서 롤플레잉을 시작합니다.".magenta());
                    }
                    Some(SlashCommand::Title) => {
                        let title = usecase.generate_title(&session_id).await?;
                        println!("{}", format!("📝 {title}").bright_white());
                    }
                    Some(SlashCommand::Status) => print_status(&usecase, &session_id).await?,
                    Some(SlashCommand::Unknown(name)) => {
                        println!("{}", format!("Unknown command: {name}").bright_black());
                    }
                    None => match usecase.process_turn(&session_id, trimmed).await {
                        Ok(outcome) => print_outcome(&outcome),
                        Err(e) => eprintln!("{}", format!("Error: {e}").red()),
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/end' to finish the session.".yellow());
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    let report = usecase.end_session(&session_id).await?;
    print_report(&report)?;
    Ok(())
}

fn print_turn(turn: &Turn) {
    let text = match turn.routine {
        Some(RoutineKind::Safety | RoutineKind::Notice) => turn.content.yellow(),
        Some(RoutineKind::RehearsalIntro | RoutineKind::RehearsalClosing) => turn.content.magenta(),
        Some(RoutineKind::Rehearsal) => turn.content.bright_cyan(),
        _ => turn.content.bright_blue(),
    };
    println!("{text}");
}

fn print_outcome(outcome: &TurnOutcome) {
    let verdict = &outcome.verdict;
    println!(
        "{}",
        format!(
            "[{} | {} {:.2} | 완성도 {:.0}%]",
            outcome.route.name(),
            verdict.emotion_label,
            verdict.emotion_intensity,
            outcome.completeness * 100.0
        )
        .bright_black()
    );
    if verdict.is_unsafe {
        println!(
            "{}",
            format!("⚠ 위험 표현 감지: {}", verdict.critical_terms().join(", ")).red()
        );
    }
    if let Some(reason) = &outcome.trigger_reason {
        println!("{}", format!("({reason})").magenta());
    }
    for turn in &outcome.outputs {
        print_turn(turn);
    }
    println!();
}

async fn print_status(usecase: &CounselUseCase, session_id: &str) -> Result<()> {
    let session = usecase.session_snapshot(session_id).await?;
    println!(
        "{}",
        format!(
            "완성도 {:.0}% | 안정화 {}회 | 롤플레잉 {}회 | 진행 중: {}",
            session.completeness() * 100.0,
            session.safety_count(),
            session.rehearsal_count(),
            if session.is_rehearsal_active() { "예" } else { "아니오" }
        )
        .bright_white()
    );
    for (key, value) in session.slots().filled() {
        println!("  {} {}", format!("{key}:").cyan(), value);
    }
    Ok(())
}

fn print_report(report: &Report) -> Result<()> {
    println!();
    println!("{}", "=== 세션 보고서 ===".bright_magenta().bold());
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
