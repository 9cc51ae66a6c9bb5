use std::{fs::File, sync::Arc};

use dotenv::dotenv;
use fit_quiz_bot::{
    config::Config,
    quiz::{
        catalog::{Catalog, CatalogError},
        Phase, QuizError, Session,
    },
    screens,
};
use log::{debug, error, info, warn};
use teloxide::{
    dispatching::dialogue::InMemStorage,
    prelude::*,
    types::{InputFile, KeyboardButton, KeyboardMarkup, ParseMode},
    utils::command::BotCommands,
};

type QuizDialogue = Dialogue<State, InMemStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    ReceiveStart,
    ReceiveAnswer {
        session: Session,
    },
    ReceiveRetry,
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
enum Command {
    #[command(description = "show the welcome screen.")]
    Start,
    #[command(description = "abandon the current game.")]
    Reset,
    #[command(description = "display this text.")]
    Help,
}

#[tokio::main]
async fn main() {
    // A missing .env is fine, the variables may come from the environment itself
    dotenv().ok();

    pretty_env_logger::init();
    info!("Starting fit quiz bot...");

    let config = Config::from_env();

    info!("Loading quiz data from {}", config.quiz_data_path.display());
    let catalog = match load_catalog(&config) {
        Ok(catalog) => Arc::new(catalog),
        Err(err) => {
            error!("Unable to load quiz data: {}", err);
            std::process::exit(1);
        }
    };
    info!(
        "Quiz data loaded: {} fits, answer policy {:?}",
        catalog.fits.len(),
        config.answer_policy
    );

    let bot = Bot::from_env();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, InMemStorage<State>, State>()
            .branch(teloxide::filter_command::<Command, _>().endpoint(handle_command))
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveStart].endpoint(receive_start))
            .branch(dptree::case![State::ReceiveAnswer { session }].endpoint(receive_answer))
            .branch(dptree::case![State::ReceiveRetry].endpoint(receive_retry)),
    )
    .dependencies(dptree::deps![
        InMemStorage::<State>::new(),
        catalog,
        Arc::new(config)
    ])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

fn load_catalog(config: &Config) -> Result<Catalog, CatalogError> {
    let file = File::open(&config.quiz_data_path)?;
    Catalog::new(file)
}

fn single_button(text: &str) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(text)]])
}

async fn show_welcome(bot: &Bot, dialogue: &QuizDialogue, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, screens::welcome())
        .parse_mode(ParseMode::Html)
        .reply_markup(single_button(screens::START_QUIZ))
        .await?;

    dialogue.update(State::ReceiveStart).await?;
    Ok(())
}

async fn handle_command(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    cmd: Command,
) -> HandlerResult {
    match cmd {
        Command::Start => show_welcome(&bot, &dialogue, msg.chat.id).await,
        Command::Reset => {
            abandon_game(&dialogue).await?;
            show_welcome(&bot, &dialogue, msg.chat.id).await
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
            Ok(())
        }
    }
}

/// Drops the stored session, sending the chat back to `NotStarted`.
async fn abandon_game(dialogue: &QuizDialogue) -> HandlerResult {
    if let Some(State::ReceiveAnswer { session }) = dialogue.get().await? {
        debug!(
            "Chat {} abandoned the game at question {}",
            dialogue.chat_id(),
            session.current_index() + 1
        );
    }
    dialogue.update(State::ReceiveStart).await?;
    Ok(())
}

async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    show_welcome(&bot, &dialogue, msg.chat.id).await
}

async fn receive_start(
    catalog: Arc<Catalog>,
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
) -> HandlerResult {
    if msg.text() != Some(screens::START_QUIZ) {
        bot.send_message(msg.chat.id, "Tap \"Start Quiz\" when you are ready")
            .reply_markup(single_button(screens::START_QUIZ))
            .await?;
        return Ok(());
    }

    let mut session = Session::new();
    let started = session.start(&catalog.fits, &mut rand::thread_rng());
    if let Err(err) = started {
        error!("Cannot start a game for chat {}: {}", msg.chat.id, err);
        bot.send_message(
            msg.chat.id,
            "The quiz is not available right now, please try again later.",
        )
        .await?;
        return Ok(());
    }

    send_question(&bot, msg.chat.id, &session).await?;
    dialogue.update(State::ReceiveAnswer { session }).await?;
    Ok(())
}

async fn send_question(bot: &Bot, chat_id: ChatId, session: &Session) -> HandlerResult {
    let question = match session.current_question() {
        Some(question) => question,
        None => return Ok(()),
    };

    let image = question.fit.image_url_or_placeholder();
    match url::Url::parse(&image) {
        Ok(url) => {
            let mut photo = bot.send_photo(chat_id, InputFile::url(url));
            if let Some(caption) = screens::image_caption(question) {
                photo = photo.caption(caption).parse_mode(ParseMode::Html);
            }
            // The question is still playable without its picture
            if let Err(err) = photo.await {
                warn!("Failed to send image of {:?}: {}", question.fit.name, err);
            }
        }
        Err(err) => warn!("Skipping bad image url {:?}: {}", image, err),
    }

    let options = question
        .options
        .iter()
        .map(|option| vec![KeyboardButton::new(option.clone())])
        .collect::<Vec<_>>();

    bot.send_message(chat_id, screens::question(session, question))
        .parse_mode(ParseMode::Html)
        .reply_markup(KeyboardMarkup::new(options))
        .await?;
    Ok(())
}

async fn receive_answer(
    catalog: Arc<Catalog>,
    config: Arc<Config>,
    bot: Bot,
    dialogue: QuizDialogue,
    mut session: Session,
    msg: Message,
) -> HandlerResult {
    let selected = match msg.text() {
        Some(text) => text,
        None => {
            bot.send_message(msg.chat.id, "Please pick one of the options")
                .await?;
            return Ok(());
        }
    };

    match session.submit_with(config.answer_policy, selected) {
        Ok(answer) => debug!(
            "Chat {} picked {:?} for {:?}, correct: {}",
            msg.chat.id, answer.selected, answer.question.fit.name, answer.correct
        ),
        Err(QuizError::UnofferedAnswer { selected }) => {
            bot.send_message(
                msg.chat.id,
                format!("\"{}\" is not one of the options, please use the buttons", selected),
            )
            .await?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    if session.phase() != Phase::GameOver {
        send_question(&bot, msg.chat.id, &session).await?;
        dialogue.update(State::ReceiveAnswer { session }).await?;
        return Ok(());
    }

    info!(
        "Chat {} finished a game with {}/{}",
        msg.chat.id,
        session.score(),
        session.questions().len()
    );
    bot.send_message(msg.chat.id, screens::results(&session, &catalog))
        .parse_mode(ParseMode::Html)
        .reply_markup(single_button(screens::TRY_AGAIN))
        .await?;

    dialogue.update(State::ReceiveRetry).await?;
    Ok(())
}

async fn receive_retry(
    catalog: Arc<Catalog>,
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
) -> HandlerResult {
    match msg.text() {
        Some(screens::TRY_AGAIN) => show_welcome(&bot, &dialogue, msg.chat.id).await,
        _ => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "Shop the collection at {}\nor tap \"Try Again\" for another round",
                    catalog.shop_url
                ),
            )
            .reply_markup(single_button(screens::TRY_AGAIN))
            .await?;
            Ok(())
        }
    }
}
