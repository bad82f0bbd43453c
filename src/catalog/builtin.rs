//! Elections the map ships with.
use super::{DatasetFile, Datasets, ElectionCatalog, ElectionConfig};
use crate::classify::color::Palette;
use crate::classify::fields::CandidateFilter;
use crate::classify::tiers::{AdvantageTable, ThresholdTable};
use crate::model::{ElectionLevel, ListType};

pub const PREFIXES: &[(ElectionLevel, u16, &str)] = &[
    (ElectionLevel::President, 2012, "2012_president_"),
    (ElectionLevel::President, 2018, "2018_president_"),
    (ElectionLevel::Mayor, 2013, "2013_mer_"),
    (ElectionLevel::Mayor, 2018, "2018_mer_"),
    (ElectionLevel::Duma, 2016, "2016_duma_"),
    (ElectionLevel::Duma, 2021, "2021_duma_"),
    (ElectionLevel::CityDuma, 2014, "2014_mosgorduma_"),
    (ElectionLevel::CityDuma, 2019, "2019_mosgorduma_"),
    (ElectionLevel::Municipal, 2017, "2017_mun_"),
];

const PRESIDENT_2012_COLORS: &[(&str, &str)] = &[
    ("Путин", "#0072bc"),
    ("Зюганов", "#d73027"),
    ("Прохоров", "#00ff00"),
    ("Жириновский", "#00bfff"),
    ("Миронов", "#ffcc00"),
];

const PRESIDENT_2018_COLORS: &[(&str, &str)] = &[
    ("Путин", "#0072bc"),
    ("Грудинин", "#a50026"),
    ("Жириновский", "#00bfff"),
    ("Собчак", "#00ff00"),
    ("Сурайкин", "#d73027"),
    ("Титов", "#70a9d8"),
    ("Явлинский", "#8bc34a"),
];

// Parties outside this list render gray.
const DUMA_2016_COLORS: &[(&str, &str)] = &[
    ("Единая_Россия", "#0072bc"),
    ("КПРФ", "#d73027"),
    ("ЛДПР", "#00bfff"),
    ("Справедливая_Россия", "#f28c28"),
    ("Яблоко", "#8bc34a"),
];

const BASE_COLORS: &[(&str, &str)] = &[
    ("Собянин", "#0072bc"),
    ("Навальный", "#f28c28"),
    ("Мельников", "#d73027"),
    ("Митрохин", "#8bc34a"),
    ("Дегтярёв", "#00bfff"),
    ("Левичев", "#999999"),
];

const PRESIDENT_2012_CANDIDATES: &[&str] =
    &["Путин", "Зюганов", "Прохоров", "Жириновский", "Миронов"];

const PRESIDENT_2018_CANDIDATES: &[&str] = &[
    "Путин",
    "Грудинин",
    "Жириновский",
    "Собчак",
    "Сурайкин",
    "Титов",
    "Явлинский",
];

const MAYOR_2013_CANDIDATES: &[&str] = &["Собянин", "Навальный", "Мельников"];

fn palette(colors: &[(&str, &str)]) -> Palette {
    colors.iter().copied().collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn file(path: &str) -> Option<DatasetFile> {
    Some(DatasetFile {
        path: path.to_string(),
        sha1: None,
    })
}

fn base_config(level: ElectionLevel, year: u16, prefix: &str) -> ElectionConfig {
    let turnout_table = if level == ElectionLevel::President {
        ThresholdTable::turnout_president()
    } else {
        ThresholdTable::turnout_generic()
    };
    ElectionConfig {
        level,
        year,
        prefix: prefix.to_string(),
        palette: palette(BASE_COLORS),
        fixed_candidates: Vec::new(),
        candidate_filter: CandidateFilter::Capitalized,
        advantage_table: AdvantageTable::standard(),
        turnout_table,
        invalid_table: ThresholdTable::invalid_rate(),
        datasets: Datasets::default(),
    }
}

pub fn catalog() -> ElectionCatalog {
    let elections = PREFIXES
        .iter()
        .map(|&(level, year, prefix)| {
            let mut config = base_config(level, year, prefix);
            match (level, year) {
                (ElectionLevel::President, 2012) => {
                    config.palette = palette(PRESIDENT_2012_COLORS);
                    config.fixed_candidates = names(PRESIDENT_2012_CANDIDATES);
                    config.candidate_filter =
                        CandidateFilter::KnownThenCapitalized(names(PRESIDENT_2012_CANDIDATES));
                    config.datasets = Datasets {
                        district: file("moscow_2012_president_results.geojson"),
                        precinct: file("uik_results_2012_president.geojson"),
                        list_type: None,
                    };
                }
                (ElectionLevel::President, 2018) => {
                    config.palette = palette(PRESIDENT_2018_COLORS);
                    config.fixed_candidates = names(PRESIDENT_2018_CANDIDATES);
                    config.candidate_filter =
                        CandidateFilter::KnownThenCapitalized(names(PRESIDENT_2018_CANDIDATES));
                    config.advantage_table = AdvantageTable::president_2018();
                    config.datasets = Datasets {
                        district: file("moscow_2018_president_results.geojson"),
                        precinct: None,
                        list_type: None,
                    };
                }
                (ElectionLevel::Mayor, 2013) => {
                    config.fixed_candidates = names(MAYOR_2013_CANDIDATES);
                    config.candidate_filter = CandidateFilter::AllowList(
                        BASE_COLORS.iter().map(|(name, _)| name.to_string()).collect(),
                    );
                    config.datasets = Datasets {
                        district: file("districts_with_2013_mer.geojson"),
                        precinct: file("united_uiks_with_final_2013_mer.geojson"),
                        list_type: None,
                    };
                }
                (ElectionLevel::Duma, 2016) => {
                    config.palette = palette(DUMA_2016_COLORS);
                    config.candidate_filter = CandidateFilter::KnownThenCapitalized(
                        DUMA_2016_COLORS.iter().map(|(name, _)| name.to_string()).collect(),
                    );
                    config.datasets = Datasets {
                        district: file("moscow_2016_duma_results.geojson"),
                        precinct: None,
                        list_type: Some(ListType::PartyList),
                    };
                }
                _ => {}
            }
            config
        })
        .collect();

    ElectionCatalog { elections }
}
