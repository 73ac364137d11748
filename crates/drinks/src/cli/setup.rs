use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use drinkapp::date;
use drinkapp::model::{Ingredient, SortOrder};

#[derive(Parser, Debug)]
#[command(
    name = "drinks",
    bin_name = "drinks",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Keep a log of the drinks you have tried", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List drinks
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Order of the list
        #[arg(short, long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,
    },

    /// Show one drink in full
    #[command(alias = "v", display_order = 2)]
    Show { id: String },

    /// Add a drink
    #[command(alias = "n", display_order = 3)]
    Add {
        /// Name of the drink
        #[arg(long)]
        name: String,

        /// Rating from 1 to 5
        #[arg(short, long)]
        rating: u8,

        #[command(flatten)]
        details: DetailArgs,
    },

    /// Change fields of an existing drink
    #[command(alias = "e", display_order = 4)]
    Edit {
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New rating from 1 to 5
        #[arg(short, long)]
        rating: Option<u8>,

        /// Drop the current ingredients before adding new ones
        #[arg(long)]
        clear_ingredients: bool,

        /// Remove the photo
        #[arg(long, conflicts_with = "photo")]
        no_photo: bool,

        #[command(flatten)]
        details: DetailArgs,
    },

    /// Delete a drink
    #[command(alias = "rm", display_order = 5)]
    Delete { id: String },

    /// Show which storage backend is in use
    #[command(display_order = 10)]
    Backend,
}

/// Fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub struct DetailArgs {
    /// Date tried, DD/MM/YYYY
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<DateTime<Utc>>,

    /// Ingredient as "<quantity> <unit> <name>", e.g. "50 ml Rum" (repeatable)
    #[arg(short, long = "ingredient", value_name = "INGREDIENT")]
    pub ingredients: Vec<Ingredient>,

    /// Preparation instructions
    #[arg(long)]
    pub instructions: Option<String>,

    /// Photo reference (path or URL)
    #[arg(long)]
    pub photo: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Rating,
    Recent,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortOrder::Name,
            SortArg::Rating => SortOrder::Rating,
            SortArg::Recent => SortOrder::Recent,
        }
    }
}

fn parse_date(input: &str) -> Result<DateTime<Utc>, String> {
    date::parse_display(input).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_naked_invocation_has_no_command() {
        assert!(parse(&["drinks"]).command.is_none());
    }

    #[test]
    fn test_list_sort_defaults_to_name() {
        match parse(&["drinks", "list"]).command {
            Some(Commands::List { sort }) => assert_eq!(sort, SortArg::Name),
            other => panic!("unexpected {:?}", other),
        }
        match parse(&["drinks", "ls", "--sort", "recent"]).command {
            Some(Commands::List { sort }) => assert_eq!(SortOrder::from(sort), SortOrder::Recent),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_add_collects_repeated_ingredients() {
        let cli = parse(&[
            "drinks",
            "add",
            "--name",
            "Mojito",
            "--rating",
            "5",
            "--date",
            "15/11/2024",
            "--ingredient",
            "50 ml Rum branco",
            "-i",
            "10 folhas Hortelã",
        ]);
        match cli.command {
            Some(Commands::Add {
                name,
                rating,
                details,
            }) => {
                assert_eq!(name, "Mojito");
                assert_eq!(rating, 5);
                assert!(details.date.is_some());
                assert_eq!(
                    details.ingredients,
                    vec![
                        Ingredient::new("Rum branco", 50.0, "ml"),
                        Ingredient::new("Hortelã", 10.0, "folhas"),
                    ]
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bad_values_are_rejected_by_the_parser() {
        let base = ["drinks", "add", "--name", "X", "--rating", "5"];
        let with = |extra: &[&'static str]| {
            Cli::try_parse_from(base.iter().chain(extra.iter()).copied())
        };

        assert!(with(&[]).is_ok());
        assert!(with(&["--date", "2024-11-15"]).is_err());
        assert!(with(&["-i", "Rum"]).is_err());
        assert!(Cli::try_parse_from(["drinks", "add", "--name", "X"]).is_err());
    }

    #[test]
    fn test_edit_photo_flags_conflict() {
        assert!(
            Cli::try_parse_from(["drinks", "edit", "1", "--no-photo", "--photo", "x.jpg"]).is_err()
        );
        let cli = parse(&["drinks", "edit", "1", "--rating", "2", "--clear-ingredients"]);
        match cli.command {
            Some(Commands::Edit {
                id,
                rating,
                clear_ingredients,
                ..
            }) => {
                assert_eq!(id, "1");
                assert_eq!(rating, Some(2));
                assert!(clear_ingredients);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
