//! Command line front end for the project, connection, settings and dashboard pages

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::bridge::Bridge;
use crate::config::{AppSettings, ByteOrder, ConnectionSettings, DeviceKind, IntervalBackingKind, Project, Theme};
use crate::dashboard::{self, Metrics, Simulator};

#[derive(Parser)]
#[command(name = "plc-dashboard", version, about = "PLC tunneling dashboard")]
pub struct Cli {
    /// Directory holding project.json and settings.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Where the dashboard refresh interval is kept
    #[arg(long, value_enum, global = true)]
    pub interval_backing: Option<IntervalBackingKind>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    /// Connection settings of the active project
    Connection {
        #[command(subcommand)]
        command: ConnectionCommand,
    },
    /// App-level settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// Dashboard refresh interval
    Interval {
        #[command(subcommand)]
        command: IntervalCommand,
    },
    /// Run the simulated dashboard until Ctrl-C
    Dashboard {
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    List {
        /// Only projects whose display or machine name contains this
        #[arg(long)]
        search: Option<String>,
    },
    New {
        display_name: String,
        machine_name: String,
    },
    /// Rename a project (display name only)
    Edit {
        machine_name: String,
        display_name: String,
    },
    /// Make a project the active one
    Switch { machine_name: String },
    Delete { machine_name: String },
    Import { file: PathBuf },
    /// Write the active (or given) project to a file
    Export {
        file: PathBuf,
        #[arg(long)]
        project: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConnectionCommand {
    Show,
    Set(ConnectionArgs),
}

#[derive(clap::Args)]
pub struct ConnectionArgs {
    #[arg(long)]
    device_type: Option<DeviceKind>,
    #[arg(long)]
    byte_order: Option<ByteOrder>,
    #[arg(long)]
    heartbeat: Option<u32>,
    /// I/O timeout in milliseconds
    #[arg(long)]
    timeout: Option<u32>,
    #[arg(long)]
    refresh_ms: Option<u64>,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    password: Option<String>,
}

impl ConnectionArgs {
    fn apply(self, settings: &mut ConnectionSettings) {
        if let Some(v) = self.device_type {
            settings.device_kind = v;
        }
        if let Some(v) = self.byte_order {
            settings.byte_order = v;
        }
        if let Some(v) = self.heartbeat {
            settings.heartbeat_period = v;
        }
        if let Some(v) = self.timeout {
            settings.io_timeout_ms = v;
        }
        if let Some(v) = self.refresh_ms {
            settings.refresh_interval_ms = v;
        }
        if let Some(v) = self.host {
            settings.host = v;
        }
        if let Some(v) = self.port {
            settings.port = v;
        }
        if let Some(v) = self.username {
            settings.username = v;
        }
        if let Some(v) = self.password {
            settings.password = v;
        }
    }
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    Show,
    Set(SettingsArgs),
}

#[derive(clap::Args)]
pub struct SettingsArgs {
    #[arg(long)]
    theme: Option<Theme>,
    /// Seconds
    #[arg(long)]
    refresh_interval: Option<u32>,
    #[arg(long)]
    auto_save_logs: Option<bool>,
    #[arg(long)]
    enable_notifications: Option<bool>,
}

impl SettingsArgs {
    fn apply(self, settings: &mut AppSettings) {
        if let Some(v) = self.theme {
            settings.theme = v;
        }
        if let Some(v) = self.refresh_interval {
            settings.refresh_interval_secs = v;
        }
        if let Some(v) = self.auto_save_logs {
            settings.auto_save_logs = v;
        }
        if let Some(v) = self.enable_notifications {
            settings.enable_notifications = v;
        }
    }
}

#[derive(Subcommand)]
pub enum IntervalCommand {
    Get,
    Set { ms: u64 },
}

pub fn execute(command: Command, bridge: &mut Bridge) -> Result<()> {
    match command {
        Command::Projects { command } => projects(command, bridge),
        Command::Connection { command } => connection(command, bridge),
        Command::Settings { command } => settings(command, bridge),
        Command::Interval { command } => interval(command, bridge),
        Command::Dashboard { ticks } => run_dashboard(bridge, ticks),
    }
}

fn projects(command: ProjectCommand, bridge: &mut Bridge) -> Result<()> {
    match command {
        ProjectCommand::List { search } => {
            let term = search.unwrap_or_default();
            print_project_list(&bridge.search(&term));
        }
        ProjectCommand::New {
            display_name,
            machine_name,
        } => {
            bridge
                .create_project(&display_name, &machine_name)
                .with_context(|| format!("Failed to create project '{machine_name}'"))?;
            done(&format!("Created project {machine_name}"));
        }
        ProjectCommand::Edit {
            machine_name,
            display_name,
        } => {
            bridge
                .edit_project(&machine_name, &display_name)
                .with_context(|| format!("Failed to rename project '{machine_name}'"))?;
            done(&format!("Renamed {machine_name} to {display_name}"));
        }
        ProjectCommand::Switch { machine_name } => {
            bridge
                .switch_active(&machine_name)
                .with_context(|| format!("Failed to switch to project '{machine_name}'"))?;
            done(&format!("Active project is now {machine_name}"));
        }
        ProjectCommand::Delete { machine_name } => {
            let removed = bridge
                .delete_project(&machine_name)
                .with_context(|| format!("Failed to delete project '{machine_name}'"))?;
            done(&format!("Deleted project {}", removed.machine_name));
        }
        ProjectCommand::Import { file } => {
            let project = bridge
                .import_project(&file)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            done(&format!("Imported project {}", project.machine_name));
        }
        ProjectCommand::Export { file, project } => {
            let exported = bridge
                .export_project(project.as_deref(), &file)
                .with_context(|| format!("Failed to export to {}", file.display()))?;
            done(&format!("Exported {} to {}", exported.machine_name, file.display()));
        }
    }
    Ok(())
}

fn connection(command: ConnectionCommand, bridge: &mut Bridge) -> Result<()> {
    match command {
        ConnectionCommand::Show => print_connection(&bridge.connection_settings()),
        ConnectionCommand::Set(args) => {
            let mut settings = bridge.connection_settings();
            args.apply(&mut settings);
            bridge
                .save_connection_settings(settings)
                .context("Failed to save connection settings")?;
            done("Connection settings saved");
            print_connection(&bridge.connection_settings());
        }
    }
    Ok(())
}

fn settings(command: SettingsCommand, bridge: &mut Bridge) -> Result<()> {
    match command {
        SettingsCommand::Show => print_settings(bridge.app_settings()),
        SettingsCommand::Set(args) => {
            let mut settings = bridge.app_settings().clone();
            args.apply(&mut settings);
            bridge.save_app_settings(settings).context("Failed to save settings")?;
            done("Settings saved");
            print_settings(bridge.app_settings());
        }
    }
    Ok(())
}

fn interval(command: IntervalCommand, bridge: &mut Bridge) -> Result<()> {
    match command {
        IntervalCommand::Get => {
            let interval = bridge.refresh_interval();
            println!("{} ms ({})", interval.current_ms(), interval.backing_name());
        }
        IntervalCommand::Set { ms } => {
            let stored = bridge
                .set_refresh_interval_ms(ms)
                .context("Failed to store refresh interval")?;
            if stored != ms {
                println!("{ms} ms is below the minimum, using {stored} ms");
            }
            done(&format!("Refresh interval set to {stored} ms"));
        }
    }
    Ok(())
}

fn run_dashboard(bridge: &Bridge, max_ticks: Option<u64>) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    #[cfg(unix)]
    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&stop))
            .context("Failed to register signal handler")?;
    }

    let mut source = Simulator::new();
    dashboard::ticker::run(
        &mut source,
        bridge.refresh_interval(),
        &stop,
        max_ticks,
        print_metrics,
    );
    Ok(())
}

/// Confirmation line for a finished command
fn done(message: &str) {
    println!("ok: {message}");
}

/// Print a failed command with its full cause chain
pub fn report_failure(err: &anyhow::Error) {
    eprintln!("plc-dashboard: {err:#}");
}

fn print_project_list(projects: &[&Project]) {
    if projects.is_empty() {
        println!("no projects");
        return;
    }
    for project in projects {
        let marker = if project.is_active { "*" } else { " " };
        println!(
            "{marker} {:<16} {:<20} {} {}:{}",
            project.machine_name,
            project.display_name,
            project.connection.device_kind,
            project.connection.host,
            project.connection.port
        );
    }
}

fn print_connection(settings: &ConnectionSettings) {
    println!("device_type:         {}", settings.device_kind);
    println!("byte_order:          {}", settings.byte_order);
    println!("heartbeat:           {}", settings.heartbeat_period);
    println!("timeout:             {} ms", settings.io_timeout_ms);
    println!("refresh_interval_ms: {}", settings.refresh_interval_ms);
    println!("address:             {}", settings.host);
    println!("port:                {}", settings.port);
    println!("username:            {}", settings.username);
    println!(
        "password:            {}",
        if settings.password.is_empty() { "(none)" } else { "********" }
    );
}

fn print_settings(settings: &AppSettings) {
    println!("theme:                {}", settings.theme);
    println!("refresh_interval:     {} s", settings.refresh_interval_secs);
    println!("auto_save_logs:       {}", settings.auto_save_logs);
    println!("enable_notifications: {}", settings.enable_notifications);
}

fn print_metrics(tick: u64, metrics: &Metrics) {
    let status = match metrics.status {
        0 => "idle",
        1 => "advancing",
        _ => "fault",
    };
    let ring = metrics
        .latest_ring()
        .map(|r| format!("#{} output={} stroke={}", r.ring, r.output, r.stroke))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "[{tick:>4}] status={status:<9} stroke={:>3} instant={:>3} ring_output={:>3} last_ring={ring}",
        metrics.advance_stroke.value(),
        metrics.instant_output.value(),
        metrics.ring_output.value(),
    );
}
