//! lokai binary entry point.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use lokai::cli::{ChatArgs, Cli, Commands, ModelsArgs, ModelsCommands};
use lokai::config::WrapperConfig;
use lokai::error::Result;
use lokai::session::{ChatParams, ChatSession};
use lokai::types::{ChatEvent, ChatResult};

type CliResult = std::result::Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = WrapperConfig::load_with_env(&cli.config);

    let result = match cli.command {
        Commands::Chat(args) => handle_chat(args, config).await,
        Commands::Models(args) => handle_models(args, config).await,
        #[cfg(feature = "web")]
        Commands::Serve(args) => handle_serve(args, config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_chat(args: ChatArgs, config: WrapperConfig) -> CliResult {
    let ChatArgs {
        model,
        url,
        images,
        system,
        no_stream,
        message,
    } = args;

    let url = url.unwrap_or_else(|| config.base_url.clone());
    let model = model.unwrap_or_else(|| config.default_model.clone());
    let mut session = ChatSession::connect(&url, &model, config).await;

    print_capabilities(&session);

    match message {
        Some(message) => {
            let mut params = ChatParams::new(message).with_images(images);
            if let Some(system) = system {
                params = params.with_system_prompt(system);
            }
            if no_stream {
                params = params.buffered();
            }
            let result = run_chat(&mut session, params).await?;
            if no_stream {
                if let Some(thinking) = &result.thinking {
                    eprintln!("{thinking}");
                }
                println!("{}", result.text);
            }
            Ok(())
        }
        None => interactive(&mut session, system, images).await,
    }
}

fn print_capabilities(session: &ChatSession) {
    let caps = session.capabilities();
    let name = if caps.model_name.is_empty() {
        session.model()
    } else {
        &caps.model_name
    };
    println!("Using: {name}");
    println!(
        "Vision: {}  Thinking: {}",
        yes_no(caps.supports_vision),
        yes_no(caps.supports_thinking)
    );
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Run one chat call, printing deltas as they arrive.
async fn run_chat(session: &mut ChatSession, params: ChatParams) -> Result<ChatResult> {
    let streaming = params.stream.unwrap_or(true);
    let result = session
        .chat_with(params, |event| match event {
            ChatEvent::Token(text) => {
                print!("{text}");
                let _ = io::stdout().flush();
            }
            ChatEvent::Thinking(text) => {
                eprint!("{text}");
                let _ = io::stderr().flush();
            }
            ChatEvent::Warning(message) => eprintln!("warning: {message}"),
        })
        .await?;

    if streaming {
        println!(); // newline after streaming
    }
    Ok(result)
}

async fn interactive(
    session: &mut ChatSession,
    system: Option<String>,
    mut images: Vec<PathBuf>,
) -> CliResult {
    println!(
        "Interactive mode - 'quit' to exit, '/image <path>' to attach, \
         '/model <name>' to switch, '/clear' to drop images"
    );

    let stdin = io::stdin();
    loop {
        print!("you: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "/clear" => {
                images.clear();
                println!("cleared images");
            }
            _ if input.starts_with("/image ") => {
                let path = PathBuf::from(input["/image ".len()..].trim());
                if path.exists() {
                    println!("added {}", path.display());
                    images.push(path);
                } else {
                    println!("image not found: {}", path.display());
                }
            }
            _ if input.starts_with("/model ") => {
                let name = input["/model ".len()..].trim();
                session.switch_model(name).await;
                print_capabilities(session);
            }
            _ => {
                let mut params =
                    ChatParams::new(input).with_images(std::mem::take(&mut images));
                if let Some(system) = &system {
                    params = params.with_system_prompt(system.clone());
                }
                print!("assistant: ");
                io::stdout().flush()?;
                if let Err(e) = run_chat(session, params).await {
                    eprintln!("error: {e}");
                }
            }
        }
    }
    Ok(())
}

async fn handle_models(args: ModelsArgs, config: WrapperConfig) -> CliResult {
    let url = args.url.clone().unwrap_or_else(|| config.base_url.clone());
    let model = config.default_model.clone();
    let session = ChatSession::connect(&url, &model, config).await;

    match args.command {
        ModelsCommands::List => {
            let models = session.list_models().await?;
            println!("Available models:");
            for name in models {
                println!("  - {name}");
            }
        }
        ModelsCommands::Pull { name } => {
            println!("Pulling {name}...");
            let done = session
                .pull_model(&name, |progress| {
                    print!("\r{}", progress.status);
                    let _ = io::stdout().flush();
                })
                .await?;
            println!();
            if done {
                println!("model {name} pulled");
            } else {
                println!("pull of {name} ended without completion");
            }
        }
        ModelsCommands::Delete { name } => {
            if session.delete_model(&name).await? {
                println!("model {name} deleted");
            } else {
                println!("failed to delete {name}");
            }
        }
    }
    Ok(())
}

#[cfg(feature = "web")]
async fn handle_serve(args: lokai::cli::ServeArgs, mut config: WrapperConfig) -> CliResult {
    if let Some(url) = args.url {
        config.base_url = url;
    }
    lokai::web::serve(args.addr, config).await?;
    Ok(())
}
