//! Main entry point for the `trackly` command-line client.
//!
//! This file initializes logging and configuration, restores the persisted
//! session, and runs one session command: signing in or out, inspecting the
//! current identity, or asking what a view or menu would show for it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use trackly_client::auth::{
    guard, notice_for, GuardDecision, LoginRequest, Notice, NoticeVariant, RegisterRequest, Route,
    Session,
};
use trackly_client::config::ClientConfig;
use trackly_client::navigation::{mobile_nav, sidebar, SidebarEntry};
use trackly_client::services::bootstrap::{load_config, start_session};
use trackly_client::ClientResult;
use trackly_client::services::dashboard::DashboardView;
use trackly_client::services::profile::{avatar_initials, role_badge};

#[derive(Parser, Debug)]
#[command(name = "trackly")]
#[command(about = "Trackly expense client session tool")]
struct Cli {
    /// Override the persisted storage file
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an employee account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and clear the stored token
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Show the navigation menu for the signed-in identity
    Nav {
        /// Show the mobile bottom bar instead of the sidebar
        #[arg(long)]
        mobile: bool,
        /// Mark entries active for this path
        #[arg(long, default_value = "/dashboard")]
        current: String,
    },
    /// Show the dashboard quick links and panels
    Dashboard,
    /// Show what the app does when navigating to a path
    Open { path: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.storage).context("load client configuration")?;
    let mut session = start_session(&config).await;
    let mut events = session.events();

    let outcome = run(cli.command, &mut session, &config).await;

    while let Ok(event) = events.try_recv() {
        if let Some(notice) = notice_for(&event, &config.branding) {
            print_notice(&notice);
        }
    }
    outcome.context("run command")
}

async fn run(command: Command, session: &mut Session, config: &ClientConfig) -> ClientResult<()> {
    match command {
        Command::Login { email, password } => {
            session.login(LoginRequest::new(email, password)).await?;
        }
        Command::Register {
            email,
            name,
            password,
        } => {
            session
                .register(RegisterRequest {
                    email,
                    password,
                    name,
                })
                .await?;
        }
        Command::Logout => session.logout().await,
        Command::Whoami => match session.current_identity() {
            Some(identity) => println!(
                "{} <{}> id={} role={} badge={} initials={}",
                identity.name,
                identity.email,
                identity.id,
                identity.role,
                serde_json::to_string(&role_badge(identity.role))?,
                avatar_initials(Some(&identity)),
            ),
            None => println!("not signed in"),
        },
        Command::Nav { mobile, current } => {
            let identity = session.current_identity();
            if mobile {
                for item in mobile_nav(identity.as_ref()) {
                    print_link(item.label, item.route, item.is_active(&current));
                }
            } else {
                match sidebar(identity.as_ref(), &config.branding) {
                    Some(bar) => {
                        println!("{}", bar.brand);
                        for section in &bar.sections {
                            println!("[{:?}]", section.kind);
                            for entry in &section.entries {
                                match entry {
                                    SidebarEntry::Link(item) => {
                                        print_link(item.label, item.route, item.is_active(&current))
                                    }
                                    SidebarEntry::SignOut => println!("    Sign Out"),
                                }
                            }
                        }
                    }
                    None => println!("not signed in"),
                }
            }
        }
        Command::Dashboard => {
            let view = DashboardView::for_identity(session.current_identity().as_ref());
            for link in &view.quick_links {
                println!("{:<16} {:<18} {}", link.title, link.route, link.description);
            }
            for panel in &view.panels {
                println!("panel: {}", serde_json::to_string(panel)?);
            }
        }
        Command::Open { path } => {
            let route = Route::parse(&path);
            match guard(route, &session.state()) {
                GuardDecision::Render => println!("render {route}"),
                GuardDecision::ShowLoading => println!("loading"),
                GuardDecision::Redirect(target) => println!("redirect {target}"),
            }
        }
    }
    Ok(())
}

fn print_link(label: &str, route: Route, active: bool) {
    let marker = if active { '*' } else { ' ' };
    println!("  {marker} {label:<16} {route}");
}

fn print_notice(notice: &Notice) {
    match notice.variant {
        NoticeVariant::Default => println!("{}: {}", notice.title, notice.description),
        NoticeVariant::Destructive => eprintln!("{}: {}", notice.title, notice.description),
    }
}
