mod catalog;
mod info;
mod legend;
mod style;
mod sync;

pub use catalog::catalog;
pub use info::info;
pub use legend::legend;
pub use style::style;
pub use sync::sync;

use clap::Args;
use election_map::model::{
    DisplayMode, ElectionContext, ElectionLevel, Feature, FeatureCollection, ListType, ViewState,
};
use election_map::util::read_serialized;
use election_map::{ElectionCatalog, StyleEngine};
use std::path::{Path, PathBuf};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Which election and view to render.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Election level (president, mayor, duma, city-duma, municipal)
    #[clap(long)]
    pub level: ElectionLevel,
    /// Election year
    #[clap(long)]
    pub year: u16,
    /// Ballot type (district, party-list)
    #[clap(long)]
    pub list_type: Option<ListType>,
    /// What the fill color encodes (winner, turnout, invalid)
    #[clap(long, default_value = "winner")]
    pub mode: DisplayMode,
    /// Map zoom; precincts are styled above 12
    #[clap(long, default_value = "10")]
    pub zoom: f64,
    /// Catalog file overriding the built-in elections
    #[clap(long)]
    pub catalog: Option<PathBuf>,
    /// Directory holding the catalog's dataset files
    #[clap(long, default_value = ".")]
    pub data_dir: PathBuf,
}

impl ViewArgs {
    pub fn view_state(&self) -> ViewState {
        let mut context = ElectionContext::new(self.level, self.year);
        context.list_type = self.list_type;
        ViewState::new(context, self.mode, self.zoom)
    }

    pub fn load_catalog(&self) -> Result<ElectionCatalog, Box<dyn std::error::Error>> {
        load_catalog(self.catalog.as_deref())
    }
}

pub fn load_catalog(path: Option<&Path>) -> Result<ElectionCatalog, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ElectionCatalog::load(path)?),
        None => Ok(ElectionCatalog::builtin()),
    }
}

/// Read `input`, or the dataset the catalog names for the layer the view styles.
pub fn load_features(
    input: Option<&Path>,
    args: &ViewArgs,
    engine: &StyleEngine<'_>,
) -> Result<(PathBuf, Vec<Feature>), Box<dyn std::error::Error>> {
    let path = match input {
        Some(path) => path.to_path_buf(),
        None => {
            let config = engine
                .config()
                .ok_or_else(|| format!("No catalog entry for {}", engine.view().context))?;
            let granularity = engine
                .layers()
                .styled_layer()
                .ok_or_else(|| format!("No data to draw for {}", engine.view().context))?;
            let context = engine.view().context;
            let file = config
                .datasets
                .get(granularity)
                .ok_or_else(|| format!("No {} dataset for {}", granularity, context))?;
            args.data_dir.join(&file.path)
        }
    };

    let collection: FeatureCollection = read_serialized(&path)?;
    Ok((path, collection.features))
}
