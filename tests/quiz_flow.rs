use std::collections::VecDeque;

use fit_quiz_bot::{
    quiz::{
        catalog::{Catalog, Fit},
        generator::RandomSource,
        Phase, Session,
    },
    screens,
};
use pretty_assertions::assert_eq;

/// Hands out fixed draws and leaves option order untouched.
struct Draws(VecDeque<Vec<usize>>);

impl Draws {
    fn new(draws: &[&[usize]]) -> Self {
        Self(draws.iter().map(|d| d.to_vec()).collect())
    }
}

impl RandomSource for Draws {
    fn sample_indices(&mut self, _length: usize, _amount: usize) -> Vec<usize> {
        self.0.pop_front().expect("no draws left")
    }

    fn shuffle_names(&mut self, _names: &mut [String]) {}
}

fn catalog(names: &[&str]) -> Catalog {
    Catalog {
        fits: names
            .iter()
            .map(|name| Fit {
                name: name.to_string(),
                personality: format!("I am {}", name),
                image_url: None,
                caption: None,
            })
            .collect(),
        discount_code: "DENIM10".to_string(),
        shop_url: "https://example.com".to_string(),
    }
}

fn nine_fits() -> Catalog {
    catalog(&["F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9"])
}

fn scenario_a_draws() -> Draws {
    Draws::new(&[&[0, 2, 6], &[0, 2], &[0, 2], &[0, 1]])
}

#[test]
fn nine_fit_game_deals_expected_options() {
    let catalog = nine_fits();
    let mut session = Session::new();
    session.start(&catalog.fits, &mut scenario_a_draws()).unwrap();

    let options = session
        .questions()
        .iter()
        .map(|q| q.options.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        options,
        vec![
            vec!["F1", "F2", "F5"],
            vec!["F3", "F4", "F8"],
            vec!["F7", "F6", "F9"],
        ]
    );
}

#[test]
fn three_fit_game_scores_any_own_name() {
    let catalog = catalog(&["A", "B", "C"]);
    let mut session = Session::new();
    session
        .start(&catalog.fits, &mut Draws::new(&[&[0, 1, 2], &[], &[], &[]]))
        .unwrap();

    for question in session.questions() {
        assert_eq!(question.options, vec![question.correct_answer.clone()]);
    }

    assert!(session.submit("A").unwrap().correct);
    assert!(!session.submit("X").unwrap().correct);
    assert!(session.submit("C").unwrap().correct);
    assert_eq!(session.score(), 2);
}

#[test]
fn two_right_one_wrong_ends_without_code() {
    let catalog = nine_fits();
    let mut session = Session::new();
    session.start(&catalog.fits, &mut scenario_a_draws()).unwrap();

    session.submit("F1").unwrap();
    session.submit("F3").unwrap();
    session.submit("F6").unwrap();

    assert_eq!(session.phase(), Phase::GameOver);
    assert_eq!(session.score(), 2);
    assert!(!session.is_perfect());

    let text = screens::results(&session, &catalog);
    assert!(text.contains("You guessed: <b>F6</b>"));
    assert!(text.contains("Correct answer: <b>F7</b>"));
    assert!(!text.contains("DENIM10"));
}

#[test]
fn perfect_game_unlocks_code() {
    let catalog = nine_fits();
    let mut session = Session::new();
    session.start(&catalog.fits, &mut scenario_a_draws()).unwrap();

    for name in ["F1", "F3", "F7"] {
        assert_eq!(session.phase(), Phase::InProgress);
        session.submit(name).unwrap();
    }

    assert_eq!(session.score(), 3);
    assert!(session.is_perfect());
    assert!(screens::results(&session, &catalog).contains("DENIM10"));
}

#[test]
fn reset_then_start_deals_a_fresh_game() {
    let catalog = nine_fits();
    let mut session = Session::new();
    session.start(&catalog.fits, &mut scenario_a_draws()).unwrap();
    session.submit("F1").unwrap();

    session.reset();
    assert_eq!(session.phase(), Phase::NotStarted);
    assert!(session.submit("F3").is_err());

    session
        .start(
            &catalog.fits,
            &mut Draws::new(&[&[1, 3, 5], &[0, 1], &[0, 1], &[0, 1]]),
        )
        .unwrap();
    let answers = session
        .questions()
        .iter()
        .map(|q| q.correct_answer.as_str())
        .collect::<Vec<_>>();
    assert_eq!(answers, vec!["F2", "F4", "F6"]);
    assert_eq!(session.current_index(), 0);
    assert!(session.answers().is_empty());
}
