use clap::Parser;
use xlint_cli::{execute_rules_check, execute_validate, init_tracing, Cli, Commands, RulesCommand};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let result = match cli.command {
        Commands::Validate(command) => execute_validate(&command),
        Commands::Rules(rules_command) => match rules_command {
            RulesCommand::Check(command) => execute_rules_check(&command),
        },
    };

    match result {
        Ok(outcome) => {
            println!("{}", outcome.output);
            if !outcome.success {
                std::process::exit(1);
            }
        }
        Err(error) => {
            tracing::error!(error = %error, "command failed");
            eprintln!("{error}");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
