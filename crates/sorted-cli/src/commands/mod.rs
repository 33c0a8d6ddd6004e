pub mod cache;
pub mod config;
pub mod create;
pub mod delete;
pub mod insert;
pub mod list;
pub mod mv;
pub mod remove;
pub mod repair;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Command {
    /// Manage sorted configuration
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
    /// Create a new collection file
    Create(create::CreateArgs),
    /// Insert one or more locators into a collection
    Insert(insert::InsertArgs),
    /// Remove entries from a collection by their internal id
    Remove(remove::RemoveArgs),
    /// Move an entry between two collections
    Move(mv::MoveArgs),
    /// List collections, or the entries of one collection
    List(list::ListArgs),
    /// Delete a collection (trash by default)
    Delete(delete::DeleteArgs),
    /// Maintain the metadata cache
    Cache {
        #[command(subcommand)]
        action: cache::CacheAction,
    },
    /// Collapse duplicate entries left behind by an interrupted move
    Repair(repair::RepairArgs),
}

pub async fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Config { action } => config::run(action),
        Command::Create(args) => create::run(args),
        Command::Insert(args) => insert::run(args).await,
        Command::Remove(args) => remove::run(args),
        Command::Move(args) => mv::run(args),
        Command::List(args) => list::run(args),
        Command::Delete(args) => delete::run(args),
        Command::Cache { action } => cache::run(action).await,
        Command::Repair(args) => repair::run(args),
    }
}
