//! Voicegate CLI: manual fallback for the auth flow and for ad-hoc calls.
//!
//! Usage:
//!   voicegate auth request --email <EMAIL> [--base-url <URL>]
//!   voicegate auth verify --email <EMAIL> --request-token <TOKEN> --code <CODE> [--base-url <URL>]
//!   voicegate call --to <E164> --callee <NAME> --context <TEXT> --objective <TEXT> [OPTIONS]
//!   voicegate version | help

use std::process;
use std::time::Duration;

use voicegate::auth::AuthClient;
use voicegate::{report, CallRequest, GatewayClient, TaskStatus, Voice, WaitOptions};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "auth" => cmd_auth(&args[2..]).await,
        "call" => cmd_call(&args[2..]).await,
        "version" | "--version" | "-V" => {
            println!("voicegate {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(err) = outcome {
        eprintln!("{}", report::render_error(&err));
        process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"voicegate - voice-call gateway client

USAGE:
    voicegate <COMMAND> [OPTIONS]

COMMANDS:
    auth request --email <EMAIL>                    Request a verification code
    auth verify  --email <EMAIL> --request-token <TOKEN> --code <CODE>
                                                    Verify the code, print credentials
    call --to <E164> --callee <NAME> --context <TEXT> --objective <TEXT>
         [--instructions <TEXT>] [--voice male|female] [--max-wait-mins <N>]
                                                    Place a call and wait for the result
    version                                         Show version information
    help                                            Show this help message

OPTIONS:
    --base-url <URL>            Gateway base URL (default: public gateway)
    --access-token <TOKEN>      Access token (overrides VOICEGATE_ACCESS_TOKEN)
    --user-id <ID>              User id (overrides VOICEGATE_USER_ID)

ENVIRONMENT:
    VOICEGATE_ACCESS_TOKEN      Access token for the call command
    VOICEGATE_USER_ID           User id for the call command
    RUST_LOG                    Log filter (e.g. voicegate=debug)"#
    );
}

fn flag(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn require_flag(args: &[String], name: &str) -> voicegate::Result<String> {
    flag(args, name).ok_or_else(|| voicegate::Error::configuration(format!("{name} is required")))
}

async fn cmd_auth(args: &[String]) -> voicegate::Result<()> {
    let Some(sub) = args.first() else {
        print_usage();
        process::exit(1);
    };

    let client = match flag(args, "--base-url") {
        Some(url) => AuthClient::with_base_url(url)?,
        None => AuthClient::new()?,
    };

    match sub.as_str() {
        "request" => {
            let email = require_flag(args, "--email")?;
            println!("Requesting verification code for {email}...");
            let pending = client.request_code(&email).await?;
            println!("Verification code sent! Check your email (including spam).");
            println!(
                "Then run: voicegate auth verify --email {email} --request-token {} --code <CODE>",
                pending.request_token
            );
            Ok(())
        }
        "verify" => {
            let email = require_flag(args, "--email")?;
            let request_token = require_flag(args, "--request-token")?;
            let code = require_flag(args, "--code")?;
            let credentials = client.verify_code(&email, &request_token, &code).await?;
            println!("Authentication successful!");
            println!();
            println!("Add this to the plugin configuration:");
            println!("  access_token = \"{}\"", credentials.access_token);
            println!("  user_id = \"{}\"", credentials.user_id);
            println!();
            println!("Then restart the host for the changes to take effect.");
            Ok(())
        }
        other => {
            eprintln!("Unknown auth subcommand: {other}");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

async fn cmd_call(args: &[String]) -> voicegate::Result<()> {
    let access_token = flag(args, "--access-token")
        .or_else(|| std::env::var("VOICEGATE_ACCESS_TOKEN").ok())
        .unwrap_or_default();
    let user_id = flag(args, "--user-id")
        .or_else(|| std::env::var("VOICEGATE_USER_ID").ok())
        .unwrap_or_default();

    let mut builder = GatewayClient::builder()
        .access_token(access_token)
        .user_id(user_id);
    if let Some(url) = flag(args, "--base-url") {
        builder = builder.base_url(url);
    }
    let client = builder.build()?;

    let mut request = CallRequest::new(
        require_flag(args, "--to")?,
        require_flag(args, "--callee")?,
        require_flag(args, "--context")?,
        require_flag(args, "--objective")?,
    );
    if let Some(instructions) = flag(args, "--instructions") {
        request = request.with_instructions(instructions);
    }
    match flag(args, "--voice").as_deref() {
        Some("male") => request = request.with_voice(Voice::Male),
        Some("female") => request = request.with_voice(Voice::Female),
        Some(other) => {
            return Err(voicegate::Error::configuration(format!(
                "--voice must be male or female, got '{other}'"
            )))
        }
        None => {}
    }

    let max_wait_mins: u64 = match flag(args, "--max-wait-mins") {
        Some(raw) => raw.parse().map_err(|_| {
            voicegate::Error::configuration(format!("--max-wait-mins must be a number, got '{raw}'"))
        })?,
        None => 30,
    };
    let max_wait = Duration::from_secs(max_wait_mins * 60);

    client.initialize().await?;
    let task = client.submit_call(&request, max_wait).await?;
    println!("Call accepted (task {}), waiting up to {max_wait_mins} minutes...", task.task_id);

    let done = client
        .wait_for_task(&task.task_id, WaitOptions::new(max_wait))
        .await?;

    if done.status == TaskStatus::Completed {
        let result = client.fetch_result(&done.task_id).await?;
        println!("{}", report::render_call_result(&result));
    } else {
        let detail = done.status_message.unwrap_or_default();
        println!("Call ended with status {:?}. {detail}", done.status);
    }
    Ok(())
}
