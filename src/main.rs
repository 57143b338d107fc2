//! calhouse — Main entry point

use calhouse::cli::{cmd_info, cmd_predict, cmd_train, Cli, Commands};
use calhouse::inference::PropertyInput;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calhouse=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            data,
            output,
            seed,
            test_split,
        } => {
            cmd_train(&data, &output, seed, test_split)?;
        }
        Commands::Predict {
            model,
            longitude,
            latitude,
            housing_median_age,
            total_rooms,
            total_bedrooms,
            population,
            households,
            median_income,
            rate,
            report,
        } => {
            let input = PropertyInput {
                longitude,
                latitude,
                housing_median_age,
                total_rooms,
                total_bedrooms,
                population,
                households,
                median_income,
            };
            cmd_predict(&model, input, rate, report.as_deref())?;
        }
        Commands::Info { data } => {
            cmd_info(&data)?;
        }
    }

    Ok(())
}
