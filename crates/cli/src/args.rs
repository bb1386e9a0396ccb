use clap::{Args, Parser, Subcommand, ValueEnum};
use labadmin_console::Flag;
use labadmin_core::types::DbId;

#[derive(Parser)]
#[command(name = "labadmin")]
#[command(about = "Administer lab members, achievements, categories and news", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides LAB_API_BASE_URL).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token (overrides LAB_API_TOKEN).
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Show the signed-in user")]
    Whoami,

    #[command(about = "Manage lab members")]
    Users {
        #[command(subcommand)]
        command: RecordCommand,
    },

    #[command(about = "Manage papers")]
    Papers {
        #[command(subcommand)]
        command: RecordCommand,
    },

    #[command(about = "Manage research projects")]
    Projects {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    #[command(about = "Manage achievement categories")]
    Categories {
        #[command(subcommand)]
        command: CategoryCommand,
    },

    #[command(about = "Manage lab news")]
    News {
        #[command(subcommand)]
        command: RecordCommand,
    },

    #[command(about = "Your own achievements")]
    Mine {
        #[command(subcommand)]
        command: MineCommand,
    },

    #[command(about = "Browse the public achievements listing")]
    Public(ListArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    /// Free-text filter.
    #[arg(long, short)]
    pub keyword: Option<String>,

    /// 1-based page number.
    #[arg(long, default_value = "1")]
    pub page: u32,

    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Subcommand)]
pub enum RecordCommand {
    #[command(about = "List one page")]
    List(ListArgs),

    #[command(about = "Flip a flag on a row of the given page")]
    Toggle {
        id: DbId,
        flag: FlagArg,
        #[command(flatten)]
        list: ListArgs,
    },

    #[command(about = "Delete a row of the given page")]
    Delete {
        id: DbId,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    #[command(flatten)]
    Record(RecordCommand),

    #[command(about = "Papers linked to a project")]
    Related { id: DbId },

    #[command(about = "List the old flat project table")]
    Legacy(ListArgs),
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    #[command(flatten)]
    Record(RecordCommand),

    #[command(about = "Print the category tree")]
    Tree {
        #[arg(long)]
        include_inactive: bool,
    },
}

#[derive(Subcommand)]
pub enum MineCommand {
    #[command(about = "List one page")]
    List(ListArgs),

    #[command(about = "Show or hide an achievement on your public page")]
    ToggleVisibility {
        id: DbId,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FlagArg {
    Published,
    Verified,
    Visibility,
    Active,
}

impl From<FlagArg> for Flag {
    fn from(arg: FlagArg) -> Self {
        match arg {
            FlagArg::Published => Flag::Published,
            FlagArg::Verified => Flag::Verified,
            FlagArg::Visibility => Flag::Visibility,
            FlagArg::Active => Flag::Active,
        }
    }
}
