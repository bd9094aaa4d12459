mod autoplay;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use language_utils::LessonCatalog;
use tokio::sync::Mutex;
use tutor_core::{
    Answer, AnswerField, Feedback, Playback, QuizMode, QuizState, SessionScore, TutorConfig,
    TutorSession, VerdictStatus,
};

use autoplay::Autoplay;
use terminal::{Input, TerminalPlayback, TypedHypotheses, render_card, render_item};

#[derive(Parser, Debug)]
#[command(version, about = "Vocabulary drills in the terminal", long_about = None)]
struct Args {
    /// Lesson catalog (JSON)
    #[arg(long, default_value = "data/lessons.json")]
    lessons: PathBuf,

    /// Config file (JSON); defaults are used without one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lesson id; the first lesson if omitted
    #[arg(long)]
    lesson: Option<u32>,

    /// Seed for every shuffle, to repeat a session exactly
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the lesson's words and characters
    List,
    /// Browse flashcards: n(ext), p(rev), s(huffle), l(isten), a(utoplay), q(uit)
    Cards {
        #[arg(long)]
        shuffle: bool,
        #[arg(long)]
        autoplay: bool,
    },
    /// Graded quiz over the lesson
    Quiz {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Pronunciation practice; type what the recognizer heard as `text:confidence | ...`
    Speak,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    /// Shown the transcription, answer with script and gloss
    Transcription,
    /// Shown the gloss, answer with script and transcription
    Gloss,
}

impl From<ModeArg> for QuizMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Transcription => QuizMode::TranscriptionPrompt,
            ModeArg::Gloss => QuizMode::GlossPrompt,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TutorConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TutorConfig::default(),
    };
    let catalog = LessonCatalog::load(&args.lessons)
        .with_context(|| format!("loading lessons from {}", args.lessons.display()))?;
    let session = TutorSession::from_catalog(config, &catalog, args.lesson, args.seed)?;

    let lesson = session.lesson();
    println!("Lesson {}: {} {}", lesson.id, lesson.title, lesson.title_locale);

    match args.command {
        Command::List => list(&session),
        Command::Cards { shuffle, autoplay } => cards(session, shuffle, autoplay).await,
        Command::Quiz { mode } => quiz(session, mode.into()).await,
        Command::Speak => speak(session).await,
    }
}

fn list(session: &TutorSession) -> Result<()> {
    let lesson = session.lesson();
    for (i, item) in lesson.words.iter().enumerate() {
        println!(
            "{:>3}. {}\t{}\t{}\t{}\t{}",
            i + 1,
            item.script,
            item.transcription,
            item.gloss_locale,
            item.gloss_english,
            item.part_of_speech
        );
    }
    let characters = lesson.han_characters();
    if !characters.is_empty() {
        println!("\nCharacters:");
        for row in characters.chunks(10) {
            println!("  {}", row.iter().map(char::to_string).collect::<Vec<_>>().join(" "));
        }
    }
    Ok(())
}

async fn cards(session: TutorSession, shuffle: bool, autoplay: bool) -> Result<()> {
    let mut playback = TerminalPlayback {
        rate: session.config().playback.rate,
    };
    let language = session.config().playback.language.clone();
    let interval = session.config().timing.autoplay_interval();

    let deck = Arc::new(Mutex::new(session.flashcards));
    if shuffle {
        deck.lock().await.shuffle();
    }
    println!("{}", render_card(&*deck.lock().await));

    let autoplay_voice = playback.clone();
    let start_autoplay =
        || Autoplay::start(deck.clone(), interval, autoplay_voice.clone(), language.clone());
    let mut running = autoplay.then(&start_autoplay);

    let mut input = Input::new();
    while let Some(line) = input.prompt("> ").await? {
        let mut deck = deck.lock().await;
        match line.trim() {
            "n" | "" => {
                deck.next();
            }
            "p" => {
                deck.prev();
            }
            "s" => deck.shuffle(),
            "l" => {
                if let Some(item) = deck.current() {
                    playback.speak(&item.script, &language);
                }
                continue;
            }
            "a" => {
                drop(deck);
                running = match running.take() {
                    Some(_) => None,
                    None => Some(start_autoplay()),
                };
                continue;
            }
            "q" => break,
            other => {
                println!("unknown key {other:?}; use n, p, s, l, a or q");
                continue;
            }
        }
        println!("{}", render_card(&deck));
    }
    drop(running);
    Ok(())
}

async fn quiz(mut session: TutorSession, mode: QuizMode) -> Result<()> {
    let timing = session.config().timing.clone();
    let quiz = session.quiz_mut(mode);
    let mut input = Input::new();

    println!("Type ? to skip a word.");
    while quiz.state() == QuizState::Active {
        println!("\n[{} left] {}", quiz.remaining(), quiz.prompt()?);

        let mut answer = Answer::default();
        let mut skipped = false;
        for &field in mode.required_fields() {
            let Some(line) = input.prompt(&format!("  {field}: ")).await? else {
                return finish(quiz.score());
            };
            if line.trim() == "?" {
                skipped = true;
                break;
            }
            match field {
                AnswerField::Script => answer.script = line,
                AnswerField::Transcription => answer.transcription = line,
                AnswerField::Gloss => answer.gloss = line,
            }
        }

        if skipped {
            let item = quiz.skip()?;
            println!("Skipped.\n{}", render_item(&item));
            tokio::time::sleep(timing.skip_delay()).await;
            continue;
        }

        let feedback = quiz.submit(&answer)?;
        print_feedback(&feedback);
        tokio::time::sleep(timing.feedback_delay(feedback.correct)).await;
        quiz.advance()?;
    }
    finish(quiz.score())
}

fn print_feedback(feedback: &Feedback) {
    if feedback.correct {
        println!("✓ Correct!");
    } else {
        println!("✗ Not quite.");
    }
    for grade in &feedback.fields {
        let mark = if grade.correct { "✓" } else { "✗" };
        println!("  {mark} {}", grade.field);
    }
    if feedback.missing_tones() {
        println!("  (the syllables were right; watch the tones)");
    }
    println!("{}", render_item(&feedback.item));
}

fn finish(score: SessionScore) -> Result<()> {
    println!("\nScore: {score}");
    Ok(())
}

async fn speak(mut session: TutorSession) -> Result<()> {
    let mut playback = TerminalPlayback {
        rate: session.config().playback.rate,
    };
    let mut input = Input::new();
    println!("Say the word, then type what was heard (`text:confidence | ...`).");
    println!("n/p move between words, q quits.");

    loop {
        let Some(item) = session.pronunciation.current() else {
            println!("(this lesson has no words)");
            return Ok(());
        };
        let item = item.clone();
        println!("\n{}", render_card(&session.pronunciation));
        session.speak(&mut playback, &item);

        let Some(line) = input.prompt("heard> ").await? else {
            return Ok(());
        };
        match line.trim() {
            "q" => return Ok(()),
            "n" => {
                session.pronunciation.next();
                continue;
            }
            "p" => {
                session.pronunciation.prev();
                continue;
            }
            _ => {}
        }

        let verdict = session
            .scorer()
            .evaluate_capture(&item, &mut TypedHypotheses(&line));
        let headline = match verdict.status {
            VerdictStatus::Pass => "Great!",
            VerdictStatus::Borderline => "Almost.",
            VerdictStatus::Fail => "Try again.",
        };
        println!(
            "{headline} heard: {}  confidence {}%  score {}%",
            verdict.recognized_or_placeholder(),
            verdict.confidence_percent,
            verdict.score_percent
        );
        if let Some(summary) = verdict.alternatives_summary() {
            println!("  alternatives: {summary}");
        }
        if let Some(tip) = &verdict.tip {
            for line in tip.lines() {
                println!("  • {line}");
            }
        }
        if verdict.status == VerdictStatus::Pass {
            session.pronunciation.next();
        }
    }
}
