use crate::commands::{build_runtime, load_config, CommandResult, StepFailure};
use roster_db::{connect_with_config, migrations, CustomerSeedDataset, SeededCustomer};

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let runtime = match build_runtime("seed") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_config(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let seed_result = CustomerSeedDataset::load(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;

        let verification = CustomerSeedDataset::verify(&pool)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), 6u8))?;

        let run_result: Result<Vec<SeededCustomer>, StepFailure> = if !verification.all_present {
            let failed_checks = verification
                .checks
                .iter()
                .filter_map(|(check, passed)| (!passed).then_some(*check))
                .collect::<Vec<_>>();
            Err(("seed_verification", verification_failure_message(&failed_checks), 6u8))
        } else {
            Ok(seed_result.customers_seeded)
        };

        pool.close().await;
        run_result
    });

    match result {
        Ok(customers) => {
            let lines: Vec<String> = customers
                .iter()
                .map(|c| format!("  - {} <{}> ({})", c.display_name, c.email_address, c.customer_id))
                .collect();
            let message = format!(
                "customer seed dataset loaded ({} customers):\n{}",
                customers.len(),
                lines.join("\n")
            );
            CommandResult::success("seed", message)
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn verification_failure_message(failed_checks: &[&str]) -> String {
    if failed_checks.is_empty() {
        "Some seed data failed to load".to_string()
    } else {
        format!("Seed verification failed for customers: {}", failed_checks.join(", "))
    }
}
