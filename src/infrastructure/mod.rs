mod clients;
mod scrapers;
mod storage;

pub use clients::{
    nfl::{LeagueUrls, NflClient},
    Credentials, PageFetcher, Session, SessionProvider,
};
pub use scrapers::{
    matchup_list::MatchupListExtractor, player_table::PlayerTableExtractor, PageExtractor,
};
pub use storage::{fs_store::FileSystemStore, sqlite_store::SqliteStore};
