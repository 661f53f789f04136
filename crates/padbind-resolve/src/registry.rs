use std::path::Path;

use ahash::AHashMap;

use padbind_db::MappingDb;
use padbind_overrides::{Console, OverrideDb, OverrideSource};

const USER_OVERRIDES_FILE: &str = "userControllers.json";
const ARCADE_OVERRIDES_FILE: &str = "arcadeStickControllers.json";

/// All loaded tables, built once before resolution begins and then shared
/// read-only across every per-controller, per-button query.
#[derive(Debug, Clone)]
pub struct MappingRegistry {
    community: MappingDb,
    user: Option<OverrideDb>,
    arcade: Option<OverrideDb>,
    consoles: AHashMap<Console, OverrideDb>,
}

impl MappingRegistry {
    pub fn new(community: MappingDb) -> Self {
        Self {
            community,
            user: None,
            arcade: None,
            consoles: AHashMap::new(),
        }
    }

    /// Load every override table found under `dir`, using the conventional
    /// file names. Missing files degrade silently to absent tables.
    pub fn load_overrides_dir(mut self, dir: &Path) -> Self {
        let user_path = dir.join(USER_OVERRIDES_FILE);
        if user_path.exists() {
            self.user = Some(OverrideDb::load(OverrideSource::User, &user_path));
        }

        let arcade_path = dir.join(ARCADE_OVERRIDES_FILE);
        if arcade_path.exists() {
            self.arcade =
                Some(OverrideDb::load(OverrideSource::ArcadeStick, &arcade_path));
        }

        for console in Console::ALL {
            let path = dir.join(console.file_name());
            if path.exists() {
                let db = OverrideDb::load(OverrideSource::Console(console), &path);
                self.consoles.insert(console, db);
            }
        }

        self
    }

    pub fn set_user(&mut self, db: OverrideDb) {
        self.user = Some(db);
    }

    pub fn set_arcade(&mut self, db: OverrideDb) {
        self.arcade = Some(db);
    }

    pub fn set_console(&mut self, console: Console, db: OverrideDb) {
        self.consoles.insert(console, db);
    }

    pub fn community(&self) -> &MappingDb {
        &self.community
    }

    pub(crate) fn user(&self) -> Option<&OverrideDb> {
        self.user.as_ref()
    }

    pub(crate) fn arcade(&self) -> Option<&OverrideDb> {
        self.arcade.as_ref()
    }

    pub(crate) fn console(&self, console: Console) -> Option<&OverrideDb> {
        self.consoles.get(&console)
    }
}
