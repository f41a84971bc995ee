//! `nook`: command-line front end for the Nook community directory.
//!
//! # Usage
//!
//! ```text
//! nook signin --email demo@example.com --password demo123
//! nook list --zone A
//! nook plan --zone A --building 1
//! nook send --to <resident-id> "Your parcel is at the front desk"
//! ```
//!
//! State lives in a SQLite file (`nook.db` unless configured otherwise), so
//! a sign-in persists across invocations until `nook signout`.

mod render;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use nook_core::{
  Community,
  directory::{self, DirectoryFilter},
  form::{ResidentForm, SignUpForm},
  model::{BuildingId, ResidentId, ZoneId},
  store::RecordStore,
};
use nook_store_sqlite::SqliteStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "nook", version, about = "Community directory for your neighbourhood")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "nook.toml")]
  config: PathBuf,

  /// SQLite store to use, overriding the configuration.
  #[arg(long, value_name = "FILE", env = "NOOK_STORE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create an account for your unit and sign in.
  #[command(name = "signup")]
  SignUp(SignUpArgs),

  /// Sign in with email and password.
  #[command(name = "signin")]
  SignIn {
    #[arg(long)]
    email:    String,
    #[arg(long, env = "NOOK_PASSWORD", hide_env_values = true)]
    password: String,
  },

  /// Sign out of the current session.
  #[command(name = "signout")]
  SignOut,

  /// Show the signed-in resident.
  Whoami,

  /// List zones.
  Zones,

  /// List buildings, optionally within one zone.
  Buildings {
    #[arg(long)]
    zone: Option<String>,
  },

  /// Residents grouped by zone and building.
  List(FilterArgs),

  /// Floor plans: each building drawn top floor first.
  Plan(FilterArgs),

  /// Add a resident on someone's behalf (requires sign-in).
  Register(RegisterArgs),

  /// Leave a message for a resident (requires sign-in).
  Send {
    /// Recipient resident id, as shown by `list`.
    #[arg(long)]
    to:   ResidentId,
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
  },

  /// Show messages addressed to you.
  Inbox,
}

#[derive(Args)]
struct SignUpArgs {
  #[arg(long)]
  email:            String,
  #[arg(long, env = "NOOK_PASSWORD", hide_env_values = true)]
  password:         String,
  #[arg(long)]
  confirm_password: String,
  #[arg(long)]
  name:             String,
  #[arg(long)]
  zone:             String,
  #[arg(long)]
  building:         String,
  #[arg(long)]
  unit:             String,
  #[arg(long)]
  phone:            Option<String>,
}

impl From<SignUpArgs> for SignUpForm {
  fn from(args: SignUpArgs) -> Self {
    SignUpForm {
      email:            args.email,
      password:         args.password,
      confirm_password: args.confirm_password,
      name:             args.name,
      zone_id:          args.zone,
      building_id:      args.building,
      unit_number:      args.unit,
      phone:            args.phone.unwrap_or_default(),
    }
  }
}

#[derive(Args)]
struct RegisterArgs {
  #[arg(long)]
  name:     String,
  #[arg(long)]
  zone:     String,
  #[arg(long)]
  building: String,
  #[arg(long)]
  unit:     String,
  #[arg(long)]
  email:    Option<String>,
  #[arg(long)]
  phone:    Option<String>,
}

impl From<RegisterArgs> for ResidentForm {
  fn from(args: RegisterArgs) -> Self {
    ResidentForm {
      name:        args.name,
      zone_id:     args.zone,
      building_id: args.building,
      unit_number: args.unit,
      email:       args.email.unwrap_or_default(),
      phone:       args.phone.unwrap_or_default(),
    }
  }
}

#[derive(Args)]
struct FilterArgs {
  /// Only this zone.
  #[arg(long)]
  zone:     Option<String>,
  /// Only buildings with this id.
  #[arg(long)]
  building: Option<String>,
}

impl FilterArgs {
  fn into_filter(self) -> nook_core::Result<DirectoryFilter> {
    Ok(DirectoryFilter {
      zone:     self.zone.as_deref().map(ZoneId::parse).transpose()?,
      building: self.building.as_deref().map(BuildingId::parse).transpose()?,
    })
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so command output stays clean.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config, cli.store)?;

  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;
  let mut community = Community::open(store)
    .await
    .context("failed to load community state")?;

  run(cli.command, &mut community).await
}

async fn run<S: RecordStore>(command: Command, community: &mut Community<S>) -> Result<()> {
  match command {
    Command::SignUp(args) => {
      community.sign_up(args.into()).await?;
      if let Some(me) = community.state().current_resident() {
        println!("Welcome, {}! You are registered at {}.", me.name, me.address);
      }
    }

    Command::SignIn { email, password } => {
      community.sign_in(&email, &password).await?;
      if let Some(me) = community.state().current_resident() {
        println!("Signed in as {}.", me.name);
      }
    }

    Command::SignOut => match community.sign_out().await? {
      Some(_) => println!("Signed out."),
      None => println!("Nobody is signed in."),
    },

    Command::Whoami => match community.state().current_resident() {
      Some(me) => {
        println!("{}", render::resident_line(me));
        print!("{}", render::dashboard(community.state(), me));
      }
      None => println!("Not signed in. The demo account is demo@example.com / demo123."),
    },

    Command::Zones => {
      for zone in directory::unique_zones(community.state().residents()) {
        println!("{zone}");
      }
    }

    Command::Buildings { zone } => {
      let zone = zone.as_deref().map(ZoneId::parse).transpose()?;
      let residents = community.state().residents();
      for key in directory::building_choices(residents, zone.as_ref()) {
        println!("Zone {} - Building {}", key.zone_id, key.building_id);
      }
    }

    Command::List(filter) => {
      let filter = filter.into_filter()?;
      let residents = community.state().residents();
      if residents.is_empty() {
        println!("No residents registered yet.");
      } else {
        print!("{}", render::list(&directory::list_view(residents, &filter)));
      }
    }

    Command::Plan(filter) => {
      let filter = filter.into_filter()?;
      let residents = community.state().residents();
      print!("{}", render::plans(&directory::floor_plan_view(residents, &filter)));
    }

    Command::Register(args) => {
      let resident = community.register_resident(args.into()).await?;
      println!("Registered {} at {} ({}).", resident.name, resident.address, resident.id);
    }

    Command::Send { to, text } => {
      let message = community.send_message(to, &text.join(" ")).await?;
      println!("Message sent to {}!", message.to.name);
    }

    Command::Inbox => {
      let state = community.state();
      let me = state
        .current_resident()
        .ok_or(nook_core::Error::NoActiveSession)?;
      println!("{} message(s)", state.inbox_count(me.id));
      for message in state.messages_for(me.id) {
        println!(
          "  {}  from {} (unit {}): {}",
          message.timestamp.format("%Y-%m-%d %H:%M"),
          message.from.name,
          message.from.address.unit_number,
          message.message,
        );
      }
    }
  }

  Ok(())
}
