//! Interactive loop over a `VimAgent`

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use nvim_agent::{EditCommand, FormatOptions, SessionOptions, VimAgent};

const HELP: &str = "\
Type vim keystrokes (e.g. iHello<Esc>, dd, :%s/a/b/g<CR>) and press Enter.

A JSON array runs a batch:
  [{\"keystrokes\": \"gg\", \"description\": \"top\"}, {\"keystrokes\": \"dd\"}]

Commands:
  :state        Editor state as shown to a model
  :context      Lines around the cursor (JSON)
  :summary      Session summary (JSON)
  :history      Executed commands
  :suggestions  Suggested next actions
  :help         This text
  :quit         Exit";

/// Lines recalled in `:state`
const STATE_HISTORY: usize = 5;

enum Flow {
    Continue,
    Quit,
}

/// Run the loop until `:quit` or end of input
pub async fn run(options: SessionOptions) -> Result<()> {
    let mut agent = VimAgent::new(options)
        .await
        .context("Failed to start nvim")?;
    println!("{}\n", agent.format_state_for_llm(&FormatOptions::default()).await?);
    println!("Type :help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"nvim> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }

        match handle_line(&mut agent, line).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("error: {e:#}"),
        }
    }

    agent.close().await?;
    Ok(())
}

async fn handle_line(agent: &mut VimAgent, line: &str) -> Result<Flow> {
    match line.trim() {
        ":quit" | ":q" => return Ok(Flow::Quit),
        ":help" => println!("{HELP}"),
        ":state" => println!(
            "{}",
            agent
                .format_state_for_llm(&FormatOptions::with_history(STATE_HISTORY))
                .await?
        ),
        ":context" => {
            let window = agent.get_context_window(5, 5).await?;
            println!("{}", serde_json::to_string_pretty(&window)?);
        }
        ":summary" => {
            let summary = agent.get_session_summary().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        ":history" => {
            if agent.history().is_empty() {
                println!("(no commands yet)");
            }
            for (idx, record) in agent.history().iter().enumerate() {
                println!(
                    "{:3}. {:20} mode {} cursor {}",
                    idx + 1,
                    record.command.label(),
                    record.state.mode,
                    record.state.cursor
                );
            }
        }
        ":suggestions" => {
            for suggestion in agent.suggest_next_actions().await? {
                println!("  • {suggestion}");
            }
        }
        trimmed if trimmed.starts_with('[') => {
            let commands: Vec<EditCommand> =
                serde_json::from_str(trimmed).context("Batch must be a JSON array of commands")?;
            let report = agent.execute_commands(commands).await;
            for record in &report.records {
                println!("{}", record.message());
            }
            if let Some(failure) = report.failure {
                println!(
                    "Stopped at command {} ({}): {}",
                    failure.index + 1,
                    failure.command.label(),
                    failure.error
                );
            }
            print_state(agent).await?;
        }
        _ => {
            let record = agent.execute_command(line, "").await?;
            println!("{}", record.message());
            print_state(agent).await?;
        }
    }
    Ok(Flow::Continue)
}

async fn print_state(agent: &VimAgent) -> Result<()> {
    let state = agent
        .format_state_for_llm(&FormatOptions::without_suggestions())
        .await?;
    println!("{state}");
    Ok(())
}
