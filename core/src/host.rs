use crate::*;

/// Ties one running game to the persisted leaderboard.
///
/// The leaderboard is loaded when the host opens and written back after every accepted score.
/// Each finished game can put at most one score on the leaderboard.
#[derive(Debug)]
pub struct GameHost<S, P = RandomMinePlacer> {
    session: GameSession<P>,
    leaderboard: Leaderboard,
    store: S,
    score_handled: bool,
}

impl<S: KeyValueStore> GameHost<S> {
    pub fn with_seed(config: GameConfig, store: S, seed: u64) -> Result<Self> {
        Self::open(config, store, RandomMinePlacer::from_seed(seed))
    }
}

impl<S: KeyValueStore, P: MinePlacer> GameHost<S, P> {
    pub fn open(config: GameConfig, store: S, placer: P) -> Result<Self> {
        let session = GameSession::new(config, placer)?;
        let leaderboard = Leaderboard::load(&store, config.leaderboard_capacity);
        log::debug!("Opened with {} leaderboard entries", leaderboard.len());
        Ok(Self {
            session,
            leaderboard,
            store,
            score_handled: false,
        })
    }

    pub fn session(&self) -> &GameSession<P> {
        &self.session
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn on_reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        self.session.on_reveal(coords)
    }

    pub fn on_flag_toggle(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.session.on_flag_toggle(coords)
    }

    pub fn on_tick(&mut self) -> bool {
        self.session.on_tick()
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.score_handled = false;
    }

    /// Offers the finished game's score to the leaderboard, asking `names` for the player name.
    pub async fn record_score<N: NameSource>(&mut self, names: &mut N) -> Result<Recording> {
        let Some(tiles_revealed) = self.session.final_score() else {
            return Ok(Recording::GameInProgress);
        };
        if self.score_handled {
            return Ok(Recording::AlreadyRecorded);
        }

        // only commit once the store has accepted the new leaderboard
        let mut leaderboard = self.leaderboard.clone();
        let recording = leaderboard.record(names, tiles_revealed).await;
        if matches!(recording, Recording::Recorded { .. }) {
            leaderboard.save(&mut self.store)?;
            self.leaderboard = leaderboard;
        }
        self.score_handled = true;
        Ok(recording)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::tests::ScriptedNames;

    /// Mines along the top row, so revealing the bottom-right corner floods the rest.
    struct TopRowPlacer;

    impl MinePlacer for TopRowPlacer {
        fn place(&mut self, board: &mut Board, _: Coord2, mines: CellCount) -> Result<()> {
            for col in 0..mines as Coord {
                board[(0, col)].is_mine = true;
            }
            Ok(())
        }
    }

    fn host(store: MemoryStore) -> GameHost<MemoryStore, TopRowPlacer> {
        GameHost::open(GameConfig::default(), store, TopRowPlacer).unwrap()
    }

    #[tokio::test]
    async fn won_game_is_recorded_and_saved() {
        let mut host = host(MemoryStore::new());
        assert_eq!(host.on_reveal((9, 9)).unwrap().outcome, RevealOutcome::Won);

        let mut names = ScriptedNames::new([Some("winner")]);
        let recording = host.record_score(&mut names).await.unwrap();

        assert_eq!(
            recording,
            Recording::Recorded {
                name: "WINNE".into(),
                rank: 0
            }
        );
        let reloaded = Leaderboard::load(host.store(), 5);
        assert_eq!(reloaded.entries()[0].tiles_revealed, 90);
    }

    #[tokio::test]
    async fn lost_game_records_revealed_tiles() {
        let mut host = host(MemoryStore::new());
        host.on_reveal((1, 0)).unwrap();
        assert_eq!(host.on_reveal((0, 5)).unwrap().outcome, RevealOutcome::HitMine);

        let mut names = ScriptedNames::new([Some("ann")]);
        host.record_score(&mut names).await.unwrap();

        assert_eq!(host.leaderboard().entries()[0].tiles_revealed, 1);
    }

    #[tokio::test]
    async fn score_is_offered_once_per_game() {
        let mut host = host(MemoryStore::new());
        let mut names = ScriptedNames::new([Some("ann"), Some("bob"), Some("cy")]);

        assert_eq!(
            host.record_score(&mut names).await.unwrap(),
            Recording::GameInProgress
        );

        host.on_reveal((9, 9)).unwrap();
        host.record_score(&mut names).await.unwrap();
        assert_eq!(
            host.record_score(&mut names).await.unwrap(),
            Recording::AlreadyRecorded
        );

        host.reset();
        host.on_reveal((9, 9)).unwrap();
        host.record_score(&mut names).await.unwrap();

        let names: Vec<_> = host.leaderboard().entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["ANN", "BOB"]);
    }

    #[tokio::test]
    async fn cancelled_name_leaves_store_untouched() {
        let mut host = host(MemoryStore::new());
        host.on_reveal((9, 9)).unwrap();

        let mut names = ScriptedNames::new([None]);
        let recording = host.record_score(&mut names).await.unwrap();

        assert_eq!(recording, Recording::Cancelled);
        assert!(host.leaderboard().is_empty());
        assert_eq!(host.store().get(Leaderboard::KEY), None);
    }

    /// Store whose writes fail until `healthy` is set.
    #[derive(Debug, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        healthy: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: String) -> Result<()> {
            if !self.healthy {
                return Err(GameError::Storage("disk full".into()));
            }
            self.inner.set(key, value)
        }
    }

    #[tokio::test]
    async fn failed_save_can_be_retried() {
        let mut host = GameHost::open(GameConfig::default(), FlakyStore::default(), TopRowPlacer)
            .unwrap();
        host.on_reveal((9, 9)).unwrap();
        let mut names = ScriptedNames::new([Some("ann"), Some("ann")]);

        assert_eq!(
            host.record_score(&mut names).await,
            Err(GameError::Storage("disk full".into()))
        );
        assert!(host.leaderboard().is_empty());

        let mut store = host.into_store();
        store.healthy = true;
        let mut host = GameHost::open(GameConfig::default(), store, TopRowPlacer).unwrap();
        host.on_reveal((9, 9)).unwrap();
        let recording = host.record_score(&mut names).await.unwrap();

        assert_eq!(
            recording,
            Recording::Recorded {
                name: "ANN".into(),
                rank: 0
            }
        );
        assert_eq!(Leaderboard::load(host.store(), 5), *host.leaderboard());
    }

    #[tokio::test]
    async fn retry_after_failed_save_prompts_again() {
        let mut host = GameHost::open(GameConfig::default(), FlakyStore::default(), TopRowPlacer)
            .unwrap();
        host.on_reveal((9, 9)).unwrap();
        let mut names = ScriptedNames::new([Some("ann"), Some("ann")]);

        assert!(host.record_score(&mut names).await.is_err());
        assert!(matches!(
            host.record_score(&mut names).await,
            Err(GameError::Storage(_))
        ));

        assert_eq!(names.requests.len(), 2);
        assert!(names.requests.iter().all(|r| r.rejection.is_none()));
    }

    #[test]
    fn opening_loads_existing_leaderboard() {
        let mut store = MemoryStore::new();
        let mut leaderboard = Leaderboard::new(5);
        leaderboard.submit("old", 33).unwrap();
        leaderboard.save(&mut store).unwrap();

        let host = host(store);

        assert_eq!(host.leaderboard(), &leaderboard);
    }

    #[test]
    fn invalid_config_is_rejected_before_play() {
        let config = GameConfig::new_unchecked((2, 2), 4, 5);

        assert!(matches!(
            GameHost::with_seed(config, MemoryStore::new(), 0),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }
}
