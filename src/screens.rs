//! Texts shown to the visitor, rendered as Telegram HTML.

use teloxide::utils::html;

use crate::quiz::catalog::Catalog;
use crate::quiz::generator::QUESTIONS_PER_GAME;
use crate::quiz::{Question, Session};

pub const START_QUIZ: &str = "Start Quiz";
pub const TRY_AGAIN: &str = "Try Again";

pub fn welcome() -> String {
    format!(
        "{}\n\n\
        Premium stretch, perfect washes, and a fit that feels custom.\n\
        Match {} denim styles and unlock your exclusive discount.\n\n\
        {}\n\
        1. View a denim personality and image\n\
        2. Guess which Milano Di Rouge fit it is\n\
        3. Get all {} correct to unlock your discount code",
        html::bold("DENIM THAT FITS LIKE A DREAM"),
        QUESTIONS_PER_GAME,
        html::bold("How It Works"),
        QUESTIONS_PER_GAME,
    )
}

/// `✓` for every point, `○` for every miss so far.
pub fn score_tracker(session: &Session) -> String {
    let score = session.score() as usize;
    let answered = session.answers().len();
    let mut icons = "✓ ".repeat(score);
    icons.push_str(&"○ ".repeat(answered.saturating_sub(score)));
    icons.trim_end().to_string()
}

pub fn progress(session: &Session) -> String {
    format!(
        "QUESTION {} OF {}",
        session.current_index() + 1,
        QUESTIONS_PER_GAME
    )
}

pub fn question(session: &Session, question: &Question) -> String {
    let mut text = progress(session);
    let tracker = score_tracker(session);
    if !tracker.is_empty() {
        text.push('\n');
        text.push_str(&html::bold(&tracker));
    }
    text.push_str(&format!(
        "\n\n{}\n\n{}",
        html::italic(&format!("\u{201c}{}\u{201d}", html::escape(&question.fit.personality))),
        html::bold("Who am I?"),
    ));
    text
}

pub fn image_caption(question: &Question) -> Option<String> {
    question
        .fit
        .caption
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(html::escape)
}

fn score_line(session: &Session) -> String {
    format!("{}/{} Correct", session.score(), QUESTIONS_PER_GAME)
}

pub fn perfect_score(session: &Session, catalog: &Catalog) -> String {
    format!(
        "✨ {} ✨\n{}\n\n\
        Your exclusive discount code:\n{}\n10% off your order\n\n{}",
        html::bold("PERFECT SCORE"),
        score_line(session),
        html::code_inline(&catalog.discount_code),
        html::link(&catalog.shop_url, "Shop Milano Di Rouge"),
    )
}

pub fn almost_there(session: &Session, catalog: &Catalog) -> String {
    let mut text = format!(
        "{}\n{}\n\n{}",
        html::bold("ALMOST THERE"),
        score_line(session),
        html::bold("Let's Review"),
    );
    for (number, answer) in session.missed() {
        text.push_str(&format!(
            "\n\nQuestion {}\nYou guessed: {}\nCorrect answer: {} ✓\n{}",
            number,
            html::bold(&html::escape(&answer.selected)),
            html::bold(&html::escape(&answer.question.fit.name)),
            html::italic(&html::escape(&answer.question.fit.personality)),
        ));
    }
    text.push_str(&format!(
        "\n\n{}",
        html::link(&catalog.shop_url, "Shop Anyway")
    ));
    text
}

pub fn results(session: &Session, catalog: &Catalog) -> String {
    if session.is_perfect() {
        perfect_score(session, catalog)
    } else {
        almost_there(session, catalog)
    }
}
