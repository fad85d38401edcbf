//! The `quizdrill run` command.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quizdrill_core::loader::{load_bank, LoadedBank};
use quizdrill_core::report::{save_json, SessionReport};
use quizdrill_core::selector::{pick_random, pick_retry, RetrySelection};
use quizdrill_core::session::{AnswerReview, Phase, QuestionView, QuizSession, ScoreSummary};
use quizdrill_core::traits::SessionObserver;
use quizdrill_report::write_markdown_review;
use quizdrill_sources::{create_source, load_config_from};

/// Console renderer for session events.
struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn on_question(&self, view: &QuestionView) {
        println!();
        println!("({}/{}) {}", view.index + 1, view.total, view.prompt);
        for (index, option) in view.options.iter().enumerate() {
            println!("  {}. {}", option_letter(index), option);
        }
    }

    fn on_answer(&self, review: &AnswerReview) {
        if review.is_correct {
            println!("Correct.");
        } else {
            println!(
                "Wrong. Correct answer: {}.",
                option_letter(review.correct_index)
            );
        }
        if !review.explanation.is_empty() {
            println!("  {}", review.explanation);
        }
    }

    fn on_finished(&self, summary: &ScoreSummary) {
        println!();
        println!(
            "Session finished: {}/{} correct.",
            summary.correct, summary.total
        );
    }
}

fn option_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// One line of player input, decoded.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Answer(usize),
    Next,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Next;
    }
    if trimmed.eq_ignore_ascii_case("q") {
        return Command::Quit;
    }
    let bytes = trimmed.as_bytes();
    if bytes.len() == 1 {
        match bytes[0].to_ascii_lowercase() {
            b @ b'a'..=b'd' => return Command::Answer((b - b'a') as usize),
            b @ b'1'..=b'4' => return Command::Answer((b - b'1') as usize),
            _ => {}
        }
    }
    Command::Unknown
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

/// Drive one session over line-based input until it finishes.
///
/// End of input quits the session, so piped input never hangs the run.
fn run_session_loop(session: &mut QuizSession, input: &mut impl BufRead) -> Result<()> {
    loop {
        match session.phase() {
            Phase::Finished => return Ok(()),
            Phase::AwaitingAnswer => {
                print!("> ");
                std::io::stdout().flush()?;
                let Some(line) = read_line(input)? else {
                    session.quit();
                    return Ok(());
                };
                match parse_command(&line) {
                    Command::Answer(chosen) => session.submit_answer(chosen)?,
                    Command::Quit => session.quit(),
                    Command::Next | Command::Unknown => {
                        println!("Answer with A-D (or 1-4), q to quit.");
                    }
                }
            }
            Phase::Reviewed => {
                print!("[Enter] next, A-D to change answer, q to quit > ");
                std::io::stdout().flush()?;
                let Some(line) = read_line(input)? else {
                    session.quit();
                    return Ok(());
                };
                match parse_command(&line) {
                    Command::Next => session.advance()?,
                    Command::Answer(chosen) => session.submit_answer(chosen)?,
                    Command::Quit => session.quit(),
                    Command::Unknown => {
                        println!("Answer with A-D (or 1-4), q to quit.");
                    }
                }
            }
        }
    }
}

pub async fn execute(
    config_path: Option<PathBuf>,
    size: Option<usize>,
    shuffle_flag: bool,
    seed: Option<u64>,
    source_overrides: Vec<String>,
    output: Option<PathBuf>,
    format: String,
) -> Result<()> {
    // Load config
    let config = load_config_from(config_path.as_deref())?;

    let source_ids = if source_overrides.is_empty() {
        config.sources.clone()
    } else {
        source_overrides
    };
    anyhow::ensure!(!source_ids.is_empty(), "no sources configured; nothing to load");

    let session_size = size.unwrap_or(config.session_size);
    anyhow::ensure!(session_size >= 1, "session size must be at least 1");

    let shuffle = shuffle_flag || config.shuffle_options;
    let output_dir = output.unwrap_or_else(|| config.output_dir.clone());

    // Assemble the bank
    let source = create_source(&config.source);
    let loaded = load_bank(source.as_ref(), &source_ids)
        .await
        .context("could not load the question bank")?;
    report_load_issues(&loaded);
    anyhow::ensure!(!loaded.bank.is_empty(), "the bank is empty; nothing to quiz");
    let LoadedBank { bank, missing, .. } = loaded;

    // One master RNG drives selection and every session's shuffling, so a
    // fixed seed reproduces the whole run.
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    if let Some(seed) = seed {
        tracing::info!("running with fixed seed {}", seed);
    }

    println!(
        "Loaded {} question(s) from {} source(s).",
        bank.len(),
        source_ids.len() - missing.len()
    );

    let mut round = pick_random(&bank, session_size, &mut rng);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    loop {
        let session_rng = StdRng::seed_from_u64(rng.random());
        let mut session =
            QuizSession::start_with_rng(round, shuffle, session_rng, Box::new(ConsoleObserver))?;
        run_session_loop(&mut session, &mut input)?;

        let summary = session.score()?;
        print_summary_table(&summary);

        let report = SessionReport::from_summary(
            &summary,
            &source_ids,
            bank.len(),
            session_size,
            shuffle,
            seed,
        );
        write_reports(&report, &output_dir, &format)?;

        match pick_retry(&bank, &session.record()) {
            RetrySelection::NothingToRetry => {
                println!("Everything answered correctly and the whole bank has been seen. Done.");
                break;
            }
            RetrySelection::Next(next) => {
                print!("Retry {} wrong/unseen question(s)? [y/N] ", next.len());
                std::io::stdout().flush()?;
                let Some(line) = read_line(&mut input)? else {
                    break;
                };
                if !line.trim().eq_ignore_ascii_case("y") {
                    break;
                }
                round = next;
            }
        }
    }

    Ok(())
}

fn report_load_issues(loaded: &LoadedBank) {
    for source_id in &loaded.missing {
        eprintln!("Warning: optional source '{source_id}' unavailable, skipped.");
    }
    for failure in &loaded.skipped {
        eprintln!(
            "Warning: {}:{}: {}",
            failure.source_id, failure.line, failure.error
        );
    }
}

fn write_reports(report: &SessionReport, output_dir: &Path, format: &str) -> Result<()> {
    if format == "none" {
        return Ok(());
    }

    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
    let formats: Vec<&str> = if format == "all" {
        vec!["json", "markdown"]
    } else {
        format.split(',').collect()
    };

    for fmt in &formats {
        match fmt.trim() {
            "json" => {
                let path = output_dir.join(format!("session-{timestamp}.json"));
                save_json(report, &path)?;
                eprintln!("Report saved to: {}", path.display());
            }
            "markdown" => {
                let path = output_dir.join(format!("review-{timestamp}.md"));
                write_markdown_review(report, &path)?;
                eprintln!("Review saved to: {}", path.display());
            }
            other => {
                eprintln!("Unknown format: {other}");
            }
        }
    }

    Ok(())
}

fn print_summary_table(summary: &ScoreSummary) {
    use comfy_table::{Cell, Table};

    if summary.wrong.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Question", "Your answer", "Correct"]);

    for item in &summary.wrong {
        let chosen = match item.chosen {
            Some(index) => format!("{}. {}", option_letter(index), item.options[index]),
            None => "(not answered)".to_string(),
        };
        table.add_row(vec![
            Cell::new(&item.id),
            Cell::new(&item.prompt),
            Cell::new(chosen),
            Cell::new(format!(
                "{}. {}",
                option_letter(item.correct_index),
                item.options[item.correct_index]
            )),
        ]);
    }

    println!("\n{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizdrill_core::model::Question;
    use quizdrill_core::traits::NoopObserver;
    use std::io::Cursor;

    fn questions(count: usize) -> Vec<Question> {
        (1..=count)
            .map(|n| Question {
                id: format!("Q{n}"),
                prompt: format!("Prompt {n}"),
                options: ["a".into(), "b".into(), "c".into(), "d".into()],
                correct_index: 1,
                explanation: String::new(),
            })
            .collect()
    }

    fn start_plain(count: usize) -> QuizSession {
        QuizSession::start_with_rng(
            questions(count),
            false,
            StdRng::seed_from_u64(0),
            Box::new(NoopObserver),
        )
        .unwrap()
    }

    #[test]
    fn parse_letters_digits_and_quit() {
        assert_eq!(parse_command("a"), Command::Answer(0));
        assert_eq!(parse_command("D"), Command::Answer(3));
        assert_eq!(parse_command("2"), Command::Answer(1));
        assert_eq!(parse_command(" b \n"), Command::Answer(1));
        assert_eq!(parse_command(""), Command::Next);
        assert_eq!(parse_command("\n"), Command::Next);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("Q"), Command::Quit);
        assert_eq!(parse_command("e"), Command::Unknown);
        assert_eq!(parse_command("5"), Command::Unknown);
        assert_eq!(parse_command("ab"), Command::Unknown);
    }

    #[test]
    fn session_loop_plays_to_the_end() {
        let mut session = start_plain(2);
        let mut input = Cursor::new("b\n\nb\n\n");
        run_session_loop(&mut session, &mut input).unwrap();

        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.score().unwrap().correct, 2);
    }

    #[test]
    fn session_loop_accepts_digit_answers() {
        let mut session = start_plain(1);
        let mut input = Cursor::new("2\n\n");
        run_session_loop(&mut session, &mut input).unwrap();

        assert_eq!(session.score().unwrap().correct, 1);
    }

    #[test]
    fn session_loop_quits_on_q() {
        let mut session = start_plain(3);
        let mut input = Cursor::new("b\n\nq\n");
        run_session_loop(&mut session, &mut input).unwrap();

        let summary = session.score().unwrap();
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.wrong.len(), 2);
    }

    #[test]
    fn session_loop_quits_on_end_of_input() {
        let mut session = start_plain(2);
        let mut input = Cursor::new("b\n");
        run_session_loop(&mut session, &mut input).unwrap();

        assert_eq!(session.phase(), Phase::Finished);
    }

    #[test]
    fn session_loop_allows_changing_an_answer_during_review() {
        let mut session = start_plain(1);
        let mut input = Cursor::new("a\nb\n\n");
        run_session_loop(&mut session, &mut input).unwrap();

        assert_eq!(session.score().unwrap().correct, 1);
    }

    #[test]
    fn session_loop_ignores_junk_input() {
        let mut session = start_plain(1);
        let mut input = Cursor::new("xyz\n9\nb\n\n");
        run_session_loop(&mut session, &mut input).unwrap();

        assert_eq!(session.score().unwrap().correct, 1);
    }
}
