extern crate log;
extern crate pretty_env_logger;

use std::path::PathBuf;

use structopt::StructOpt;

use collections::EntityKind;

use kirkos::{
    admin::AdminOptions,
    contact::ContactOptions,
    dashboard::DashboardOptions,
    locales::{ListOptions, TranslateOptions},
    opts::{fatal, Admin},
    route::RouteOptions,
    search::{FilterOptions, SearchOptions},
    Result,
};

/// KIRKOS LegalAid directory and administration
#[derive(Debug, StructOpt)]
#[structopt(name = "kirkos")]
struct Cli {
    /// Log level
    #[structopt(long, default_value = "info")]
    log_level: String,

    /// Project directory containing kirkos.toml
    #[structopt(short, long, parse(from_os_str), default_value = ".")]
    project: PathBuf,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// List available languages
    Locales {
        /// Show untranslated keys for each language
        #[structopt(short, long)]
        missing: bool,
    },

    /// Resolve message keys
    Translate {
        /// Language code
        #[structopt(short, long)]
        lang: Option<String>,

        /// Message keys
        keys: Vec<String>,
    },

    /// Search a collection
    Search {
        /// Collection name (lawyers, resources, emergency, offices)
        kind: EntityKind,

        /// Free text search
        query: Option<String>,

        /// Equality filter as field=value
        #[structopt(short, long = "filter")]
        filters: Vec<String>,
    },

    /// List the choices for a filter field
    Options {
        /// Collection name (lawyers, resources, emergency, offices)
        kind: EntityKind,

        /// Field name
        field: String,

        /// Language code
        #[structopt(short, long)]
        lang: Option<String>,
    },

    /// Manage a collection
    Admin {
        /// Collection name (lawyers, resources, emergency, offices)
        kind: EntityKind,

        /// Administrator email
        #[structopt(short, long)]
        email: Option<String>,

        /// Administrator password
        #[structopt(long, env = "KIRKOS_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[structopt(subcommand)]
        action: Admin,
    },

    /// Resolve paths to pages
    Route {
        /// Language code
        #[structopt(short, long)]
        lang: Option<String>,

        /// Request paths
        #[structopt(required = true)]
        paths: Vec<String>,
    },

    /// Check a message for the legal aid center
    Contact {
        /// Language code
        #[structopt(short, long)]
        lang: Option<String>,

        /// Form inputs as field=value, lists the fields when empty
        #[structopt(short = "s", long = "set")]
        fields: Vec<String>,
    },

    /// Show record counts
    Dashboard {
        /// Language code
        #[structopt(short, long)]
        lang: Option<String>,

        /// Administrator email
        #[structopt(short, long)]
        email: Option<String>,

        /// Administrator password
        #[structopt(long, env = "KIRKOS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

async fn run(cmd: Command, project: PathBuf) -> Result<()> {
    match cmd {
        Command::Locales { missing } => {
            kirkos::locales::list(ListOptions { project, missing })?;
        }
        Command::Translate { lang, keys } => {
            kirkos::locales::translate(TranslateOptions {
                project,
                lang,
                keys,
            })?;
        }
        Command::Search {
            kind,
            query,
            filters,
        } => {
            kirkos::search::search(SearchOptions {
                project,
                kind,
                query: query.unwrap_or_default(),
                filters,
            })
            .await?;
        }
        Command::Options { kind, field, lang } => {
            kirkos::search::options(FilterOptions {
                project,
                lang,
                kind,
                field,
            })
            .await?;
        }
        Command::Admin {
            kind,
            email,
            password,
            action,
        } => {
            kirkos::admin::run(AdminOptions {
                project,
                kind,
                email,
                password,
                action: action.into(),
            })
            .await?;
        }
        Command::Route { lang, paths } => {
            kirkos::route::route(RouteOptions {
                project,
                lang,
                paths,
            })?;
        }
        Command::Contact { lang, fields } => {
            kirkos::contact::contact(ContactOptions {
                project,
                lang,
                fields,
            })?;
        }
        Command::Dashboard {
            lang,
            email,
            password,
        } => {
            kirkos::dashboard::dashboard(DashboardOptions {
                project,
                lang,
                email,
                password,
            })
            .await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::from_args();
    kirkos::opts::panic_hook();
    kirkos::opts::log_level(&*args.log_level).or_else(fatal)?;

    run(args.cmd, args.project).await.or_else(fatal)?;
    Ok(())
}
