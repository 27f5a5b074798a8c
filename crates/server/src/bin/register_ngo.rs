//! Register an NGO partner out-of-band.
//!
//! ```text
//! register-ngo <email> <password> <organization name> [description]
//! ```
//!
//! Optional profile fields come from `NGO_REGISTRATION_NUMBER`, `NGO_PHONE`,
//! `NGO_ADDRESS` and `NGO_WEBSITE`.

use server::{auth::password::hash_password, db, repo};
use shared_types::{is_plausible_email, NewNgo, MIN_PASSWORD_LEN};

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_args() -> Result<NewNgo, String> {
    let mut args = std::env::args().skip(1);
    let usage = "usage: register-ngo <email> <password> <organization name> [description]";

    let email = args.next().ok_or(usage)?;
    let password = args.next().ok_or(usage)?;
    let org_name = args.next().ok_or(usage)?;
    let description = args.next();

    if !is_plausible_email(&email) {
        return Err(format!("'{email}' is not a valid email address"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
    }
    if org_name.trim().is_empty() {
        return Err("Organization name is required".to_string());
    }

    Ok(NewNgo {
        org_name,
        email,
        password,
        registration_number: optional_env("NGO_REGISTRATION_NUMBER"),
        phone: optional_env("NGO_PHONE"),
        address: optional_env("NGO_ADDRESS"),
        website: optional_env("NGO_WEBSITE"),
        description,
    })
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let ngo = match parse_args() {
        Ok(ngo) => ngo,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&ngo).await {
        eprintln!("Failed to register NGO: {e}");
        std::process::exit(1);
    }
}

async fn run(ngo: &NewNgo) -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
    let pool = db::pool_for(&url)?;
    db::run_migrations(&pool).await?;

    let password_hash = hash_password(&ngo.password)?;

    let mut tx = pool.begin().await?;
    let account = repo::account::create(&mut *tx, &ngo.email, &password_hash).await?;
    let profile = repo::ngo::create(&mut *tx, account.id, ngo).await?;
    tx.commit().await?;

    println!("Registered {} <{}> as {}", profile.org_name, profile.email, profile.id);
    Ok(())
}
