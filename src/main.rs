use adult_enrollment::config::cli::{parse_confirmation, Command, LogFormat, SubmitArgs};
use adult_enrollment::core::controller::{FormState, FormView, SUCCESS_MESSAGE};
use adult_enrollment::domain::model::{EmploymentStatus, Field, FormInput};
use adult_enrollment::presentation::{html, text};
use adult_enrollment::utils::error::GENERIC_SUBMISSION_NOTICE;
use adult_enrollment::utils::logger;
use adult_enrollment::{app, config, AppError, Cli, FormController, SubmitOutcome};
use chrono::Datelike;
use clap::Parser;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

const EXIT_INVALID: i32 = 2;
const EXIT_SUBMISSION_FAILED: i32 = 5;
const EXIT_ABANDONED: i32 = 6;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI args: {:?}", cli);

    match run(cli).await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("❌ {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<i32, AppError> {
    match cli.command {
        Command::Info => {
            print!("{}", text::render_info());
            Ok(0)
        }
        Command::Page { output } => {
            let page = html::render_page(&FormView::default(), chrono::Utc::now().year());
            match output {
                Some(path) => {
                    tokio::fs::write(&path, page).await?;
                    tracing::info!("✅ Page written to {}", path.display());
                }
                None => print!("{}", page),
            }
            Ok(0)
        }
        Command::Submit(args) => {
            let config = config::load(cli.config.as_deref())?;
            let form = app::build_controller(&config)?;
            submit_once(&form, args).await
        }
        Command::Interactive => {
            let config = config::load(cli.config.as_deref())?;
            let form = app::build_controller(&config)?;
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            interactive(&form, &mut lines).await
        }
    }
}

async fn submit_once(form: &FormController, args: SubmitArgs) -> Result<i32, AppError> {
    form.set_values(FormInput::from(args)).await;

    match form.submit().await {
        SubmitOutcome::Succeeded(handle) => {
            tracing::info!("📁 Document id: {}", handle.id);
            println!("✅ {}", SUCCESS_MESSAGE);
            Ok(0)
        }
        SubmitOutcome::Invalid(errors) => {
            eprintln!("❌ Revise los siguientes campos:");
            for (field, message) in errors.iter() {
                eprintln!("  {} ({}): {}", field.label(), SubmitArgs::flag_for(field), message);
            }
            Ok(EXIT_INVALID)
        }
        SubmitOutcome::Failed => {
            eprintln!("❌ {}", GENERIC_SUBMISSION_NOTICE);
            Ok(EXIT_SUBMISSION_FAILED)
        }
        SubmitOutcome::Ignored(state) => {
            tracing::warn!("Submission ignored, form was {:?}", state);
            Ok(EXIT_SUBMISSION_FAILED)
        }
    }
}

async fn interactive<R>(form: &FormController, lines: &mut Lines<R>) -> Result<i32, AppError>
where
    R: AsyncBufRead + Unpin,
{
    print!("{}", text::render_info());

    let mut pending: Vec<Field> = Field::ALL.to_vec();
    loop {
        for field in &pending {
            let Some(value) = prompt_field(lines, *field).await? else {
                tracing::warn!("Input closed before the form was complete, nothing submitted");
                return Ok(EXIT_ABANDONED);
            };
            form.set_field(*field, value).await;
        }

        match form.submit().await {
            SubmitOutcome::Invalid(errors) => {
                println!("\nRevise los siguientes campos:");
                print!("{}", text::render_errors(&errors));
                pending = errors.fields();
            }
            SubmitOutcome::Succeeded(_) => {
                print!("\n{}", text::render_view(&form.snapshot().await));
                if !confirm(lines, "¿Registrar otra inscripción? (s/N): ", false).await? {
                    return Ok(0);
                }
                wait_until_idle(form).await;
                pending = Field::ALL.to_vec();
            }
            SubmitOutcome::Failed => {
                print!("\n{}", text::render_view(&form.snapshot().await));
                let retry = confirm(lines, "¿Intentar nuevamente? (s/N): ", false).await?;
                form.acknowledge_failure().await;
                if !retry {
                    return Ok(EXIT_SUBMISSION_FAILED);
                }
                // 保留原本的內容直接重新送出
                pending.clear();
            }
            SubmitOutcome::Ignored(state) => {
                tracing::warn!("Submission ignored, form was {:?}", state);
                wait_until_idle(form).await;
            }
        }
    }
}

async fn prompt_field<R>(lines: &mut Lines<R>, field: Field) -> Result<Option<String>, AppError>
where
    R: AsyncBufRead + Unpin,
{
    if field == Field::EmploymentStatus {
        print!("{}", text::render_status_options());
    }
    print_prompt(&format!("{} *: ", field.label()));

    let Some(line) = lines.next_line().await? else {
        return Ok(None);
    };

    // 選單可以輸入編號
    if field == Field::EmploymentStatus {
        if let Some(status) = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| EmploymentStatus::ALL.get(i))
        {
            return Ok(Some(status.label().to_string()));
        }
    }
    Ok(Some(line))
}

async fn confirm<R>(lines: &mut Lines<R>, question: &str, default: bool) -> Result<bool, AppError>
where
    R: AsyncBufRead + Unpin,
{
    print_prompt(question);
    let answer = lines.next_line().await?;
    Ok(parse_confirmation(answer.as_deref(), default))
}

fn print_prompt(prompt: &str) {
    use std::io::Write;
    print!("{}", prompt);
    let _ = std::io::stdout().flush();
}

async fn wait_until_idle(form: &FormController) {
    while form.state().await != FormState::Idle {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adult_enrollment::domain::model::DocumentHandle;
    use adult_enrollment::domain::ports::DocumentStore;
    use adult_enrollment::{SubmissionClient, SubmissionError};
    use async_trait::async_trait;
    use serde_json::{Map, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// 每次寫入都失敗的資料庫，記錄呼叫次數
    struct UnreachableStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentStore for UnreachableStore {
        async fn append(
            &self,
            _collection: &str,
            _document: Map<String, Value>,
        ) -> Result<DocumentHandle, SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SubmissionError::Rejected {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    fn unreachable_form() -> (Arc<UnreachableStore>, FormController) {
        let store = Arc::new(UnreachableStore {
            calls: AtomicUsize::new(0),
        });
        let client = SubmissionClient::new(store.clone(), "registros");
        (store, FormController::new(client))
    }

    const VALID_ANSWERS: &str = "Ana\nPérez\n35\nana@example.com\n1\nQuiero mejorar mis habilidades\n";

    #[tokio::test]
    async fn test_closed_input_after_failure_does_not_resubmit() {
        let (store, form) = unreachable_form();
        let mut lines = VALID_ANSWERS.as_bytes().lines();

        let code = interactive(&form, &mut lines).await.unwrap();

        assert_eq!(code, EXIT_SUBMISSION_FAILED);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(form.state().await, FormState::Idle);
    }

    #[tokio::test]
    async fn test_explicit_retry_submits_once_more() {
        let (store, form) = unreachable_form();
        let input = format!("{}s\n", VALID_ANSWERS);
        let mut lines = input.as_bytes().lines();

        let code = interactive(&form, &mut lines).await.unwrap();

        assert_eq!(code, EXIT_SUBMISSION_FAILED);
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_blank_retry_answer_means_no() {
        let (store, form) = unreachable_form();
        let input = format!("{}\n", VALID_ANSWERS);
        let mut lines = input.as_bytes().lines();

        let code = interactive(&form, &mut lines).await.unwrap();

        assert_eq!(code, EXIT_SUBMISSION_FAILED);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_input_closed_mid_form_exits_non_zero() {
        let (store, form) = unreachable_form();
        let mut lines = "Ana\nPérez\n".as_bytes().lines();

        let code = interactive(&form, &mut lines).await.unwrap();

        assert_eq!(code, EXIT_ABANDONED);
        assert_ne!(code, 0);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }
}
