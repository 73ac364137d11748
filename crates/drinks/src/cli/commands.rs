use super::render;
use super::setup::{Cli, Commands, DetailArgs, SortArg};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use drinkapp::config::DrinksConfig;
use drinkapp::model::Drink;
use drinkapp::repository::{AppRepository, Repository};
use drinkapp::state::{DrinkForm, DrinkList};
use drinkapp::store::{FsKeyValueStore, PostgrestClient};
use tracing_subscriber::EnvFilter;

type AppList = DrinkList<FsKeyValueStore, PostgrestClient>;

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = DrinksConfig::load().context("could not load configuration")?;
    let repository = AppRepository::open(&config)?;
    tracing::debug!(backend = repository.selector().name(), "repository ready");

    let command = cli.command.unwrap_or(Commands::List {
        sort: SortArg::Name,
    });

    match command {
        Commands::Backend => {
            let location = location(&config, &repository)?;
            print!("{}", render::backend(repository.selector(), &location));
        }
        Commands::List { sort } => {
            let list = open(repository).await?;
            print!("{}", render::drink_list(&list.sorted(sort.into())));
        }
        Commands::Show { id } => {
            let list = open(repository).await?;
            print!("{}", render::drink_detail(find(&list, &id)?));
        }
        Commands::Add {
            name,
            rating,
            details,
        } => {
            let mut form = DrinkForm::new();
            form.set_name(name);
            form.set_rating(rating);
            apply_details(&mut form, details);
            check(&mut form)?;

            let mut list = open(repository).await?;
            let id = list.add_new_drink(form.new_drink()).await?;
            println!("Added {} ({})", form.name().trim(), id);
        }
        Commands::Edit {
            id,
            name,
            rating,
            clear_ingredients,
            no_photo,
            details,
        } => {
            let mut list = open(repository).await?;
            let mut form = DrinkForm::from_drink(find(&list, &id)?);
            if let Some(name) = name {
                form.set_name(name);
            }
            if let Some(rating) = rating {
                form.set_rating(rating);
            }
            if clear_ingredients {
                form.clear_ingredients();
            }
            if no_photo {
                form.set_photo(None);
            }
            apply_details(&mut form, details);
            check(&mut form)?;

            list.update_existing_drink(&form.drink_data(&id)).await?;
            println!("Updated {} ({})", form.name().trim(), id);
        }
        Commands::Delete { id } => {
            let mut list = open(repository).await?;
            let name = find(&list, &id)?.name.clone();
            list.remove_drink(&id).await?;
            println!("Deleted {} ({})", name, id);
        }
    }
    Ok(())
}

/// Load the collection, turning a recorded load failure into an error.
async fn open(repository: AppRepository) -> Result<AppList> {
    let list = DrinkList::open(repository).await;
    if let Some(message) = list.error() {
        bail!("{}", message);
    }
    Ok(list)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "drinkapp=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Where the selected backend keeps its data.
fn location(config: &DrinksConfig, repository: &AppRepository) -> Result<String> {
    Ok(match repository {
        Repository::Local(_) => config.data_dir()?.display().to_string(),
        Repository::Remote(_) => config.backend.url.trim().to_string(),
    })
}

fn find<'a>(list: &'a AppList, id: &str) -> Result<&'a Drink> {
    list.get(id).ok_or_else(|| anyhow!("No drink with id {}", id))
}

fn apply_details(form: &mut DrinkForm, details: DetailArgs) {
    if let Some(date) = details.date {
        form.set_date(date);
    }
    for ingredient in details.ingredients {
        form.add_ingredient(ingredient);
    }
    if let Some(instructions) = details.instructions {
        form.set_instructions(instructions);
    }
    if let Some(photo) = details.photo {
        form.set_photo(Some(photo));
    }
}

fn check(form: &mut DrinkForm) -> Result<()> {
    if form.validate() {
        Ok(())
    } else {
        bail!("{}", render::form_errors(form.errors()))
    }
}
