use clap::Parser;
use hayya_client::config::cli::{ChatArgs, Command, PredictArgs};
use hayya_client::utils::error::{ErrorSeverity, HayyaError};
use hayya_client::utils::logger;
use hayya_client::{
    BackendClient, ChatSession, CliConfig, ClientConfig, Predictor, RequestOutcome,
    TerminalRenderer,
};

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: &HayyaError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.severity()));
}

async fn run_predict(client: BackendClient, args: &PredictArgs) -> i32 {
    let raw_dates = match args.raw_dates() {
        Ok(raw) => raw,
        Err(e) => fail(&e),
    };

    let mut predictor = Predictor::new(client);
    let mut renderer = TerminalRenderer::stdio(args.json);

    match predictor
        .handle_submission(&raw_dates, args.raw_lookback(), &mut renderer)
        .await
    {
        RequestOutcome::Success(_) => 0,
        RequestOutcome::Failure(_) => 1,
    }
}

async fn run_chat(client: BackendClient, args: &ChatArgs) -> i32 {
    let mut session = ChatSession::new(client);
    let mut renderer = TerminalRenderer::stdio(false);

    if !args.no_greeting {
        session.load_greeting(&mut renderer).await;
    }
    for message in &args.message {
        session.send(message, &mut renderer).await;
    }
    0
}

async fn run_greet(client: BackendClient) -> i32 {
    let mut session = ChatSession::new(client);
    let mut renderer = TerminalRenderer::stdio(false);
    session.load_greeting(&mut renderer).await;
    0
}

async fn run_health(client: BackendClient, config: &ClientConfig) -> i32 {
    match client.health().await {
        Ok(health) => {
            println!("✅ {} - {}", health.status, health.message);
            0
        }
        Err(e) => {
            tracing::error!("Health check against {} failed: {}", config.base_url, e);
            eprintln!("❌ {}", e.user_friendly_message());
            exit_code(e.severity())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let (verbose, json_logs) = cli.logging();
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting hayya CLI");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    let client = match BackendClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => fail(&e),
    };
    tracing::debug!("Using backend at {}", config.base_url);

    let code = match &cli.command {
        Command::Predict(args) => run_predict(client, args).await,
        Command::Chat(args) => run_chat(client, args).await,
        Command::Greet => run_greet(client).await,
        Command::Health => run_health(client, &config).await,
    };

    std::process::exit(code);
}
