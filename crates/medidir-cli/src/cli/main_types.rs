use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "medidir")]
#[command(about = "Browse the healthcare directory: doctors, hospitals and medical institutes")]
#[command(version)]
#[command(after_help = "Examples:
  medidir doctors list --name Sarah         # Search doctors by name
  medidir doctors list --speciality 4 --page 2
  medidir hospitals show 5 --tab doctors    # Doctors working at hospital 5
  medidir institutes show 9 --tab alumni    # Alumni of institute 9
  medidir auth login --email me@example.com
  medidir config set --api-url https://api.example.com/api

Environment Variables:
  MEDIDIR_API_URL     Directory API base URL
  MEDIDIR_PAGE_SIZE   Rows per page
  RUST_LOG            Log filter (overridden by --verbose)")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Profile whose stored session token is used (default: 'default')
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Directory API base URL for this invocation
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Keep the session token in memory only (nothing is read from or written to the keychain)
    #[arg(long, global = true)]
    pub no_keyring: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search and view doctors
    Doctors {
        #[command(subcommand)]
        command: DoctorCommands,
    },
    /// Search and view hospitals
    Hospitals {
        #[command(subcommand)]
        command: HospitalCommands,
    },
    /// Search and view medical institutes
    Institutes {
        #[command(subcommand)]
        command: InstituteCommands,
    },
    /// Sign in and out
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configuration management (show, set)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Paging and output options shared by every list command
#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page to show, starting at 1
    #[arg(long, default_value = "1", help_heading = "Paging Options")]
    pub page: u32,

    /// Rows per page (default from config, 10)
    #[arg(long, help_heading = "Paging Options")]
    pub size: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", help_heading = "Output Options")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum DoctorCommands {
    /// List doctors matching the filters
    #[command(after_help = "Examples:
  medidir doctors list --name Sarah
  medidir doctors list --hospital 5 --degree 2 --format json")]
    List(DoctorListArgs),
    /// Show a doctor's profile, workplaces and degrees
    Show {
        id: u64,
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Show the IDs accepted by the list filters
    Options,
}

#[derive(Args, Debug)]
pub struct DoctorListArgs {
    /// Doctor name (partial match)
    #[arg(long, help_heading = "Filters")]
    pub name: Option<String>,
    /// BMDC registration number
    #[arg(long, help_heading = "Filters")]
    pub bmdc_no: Option<String>,
    /// Hospital ID
    #[arg(long, help_heading = "Filters")]
    pub hospital: Option<u64>,
    /// Degree ID
    #[arg(long, help_heading = "Filters")]
    pub degree: Option<u64>,
    /// Speciality ID
    #[arg(long, help_heading = "Filters")]
    pub speciality: Option<u64>,
    /// District ID
    #[arg(long, help_heading = "Filters")]
    pub district: Option<u64>,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HospitalTabArg {
    #[default]
    Overview,
    Doctors,
    Tests,
}

#[derive(Subcommand, Debug)]
pub enum HospitalCommands {
    /// List hospitals matching the filters
    List(HospitalListArgs),
    /// Show a hospital and one of its tabs
    #[command(after_help = "Examples:
  medidir hospitals show 5
  medidir hospitals show 5 --tab tests --tab-page 2")]
    Show {
        id: u64,
        #[arg(long, value_enum, default_value = "overview")]
        tab: HospitalTabArg,
        /// Page of the tab's list, starting at 1
        #[arg(long, default_value = "1")]
        tab_page: u32,
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Show the IDs accepted by the list filters
    Options,
}

#[derive(Args, Debug)]
pub struct HospitalListArgs {
    /// Hospital name (partial match)
    #[arg(long, help_heading = "Filters")]
    pub name: Option<String>,
    /// District ID
    #[arg(long, help_heading = "Filters")]
    pub district: Option<u64>,
    /// Hospital type ID
    #[arg(long, help_heading = "Filters")]
    pub hospital_type: Option<u64>,
    /// Organization type ID
    #[arg(long, help_heading = "Filters")]
    pub organization_type: Option<u64>,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InstituteTabArg {
    #[default]
    Overview,
    Faculty,
    Alumni,
}

#[derive(Subcommand, Debug)]
pub enum InstituteCommands {
    /// List institutes matching the filters
    List(InstituteListArgs),
    /// Show an institute and one of its tabs
    Show {
        id: u64,
        #[arg(long, value_enum, default_value = "overview")]
        tab: InstituteTabArg,
        /// Page of the tab's list, starting at 1
        #[arg(long, default_value = "1")]
        tab_page: u32,
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Show the IDs accepted by the list filters
    Options,
}

#[derive(Args, Debug)]
pub struct InstituteListArgs {
    /// Institute name (partial match)
    #[arg(long, help_heading = "Filters")]
    pub name: Option<String>,
    /// District ID
    #[arg(long, help_heading = "Filters")]
    pub district: Option<u64>,
    /// Organization type ID
    #[arg(long, help_heading = "Filters")]
    pub organization_type: Option<u64>,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Sign in and store the session token for the profile
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Show who is signed in
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Persist configuration values; the URL comes from the global --api-url
    #[command(after_help = "Examples:
  medidir config set --api-url http://localhost:8080/api
  medidir config set --page-size 25")]
    Set {
        /// Rows per list page (1-100)
        #[arg(long)]
        page_size: Option<u32>,
    },
}
