pub mod bars;
pub mod cards;
pub mod catalogue;
pub mod colors;
pub mod dashboard;
pub mod detail;
pub mod format;
pub mod map;
pub mod metric;
pub mod prefs;
pub mod radar;
pub mod resolver;
pub mod selection;

pub use bars::{RankedBar, RankedBarChart, build_ranked_bar_chart, build_ranked_bars};
pub use catalogue::{Catalogue, CatalogueError, CityId, CityRecord};
pub use colors::{CategoryTone, ScoreBand};
pub use dashboard::Dashboard;
pub use detail::{DetailPanel, build_detail_panel};
pub use metric::{Metric, MetricScores};
pub use prefs::{DarkMode, MemoryStore, PreferenceError, PreferenceStore};
pub use radar::{RadarChart, RadarRow, build_radar_series};
pub use resolver::{category_color, score_color, score_of};
pub use selection::{Action, AddEligibility, MAX_COMPARED, SelectionState};
