//! # Command Router
//!
//! The poll loop: waits, reads the latest message in the monitored room, routes
//! recognized commands to the ISS or launch pipelines and posts the result.
//! Nothing in here returns an error; every failure degrades to a skipped or
//! partial response.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use crate::application::geocode::resolve_place;
use crate::application::launch::launch_info;
use crate::application::orbital::fetch_fix;
use crate::application::parsing::CommandParser;
use crate::application::report::location_message;
use crate::domain::config::BotConfig;
use crate::domain::traits::{ChatProvider, Clock, GeocodeProvider, LaunchProvider, OrbitalProvider};
use crate::domain::types::Command;
use crate::strings::logs;

/// The providers a cycle talks to.
#[derive(Clone)]
pub struct Providers {
    pub chat: Arc<dyn ChatProvider>,
    pub orbital: Arc<dyn OrbitalProvider>,
    pub geocoder: Arc<dyn GeocodeProvider>,
    pub launches: Arc<dyn LaunchProvider>,
}

/// What a single poll cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No message, or the chat provider could not be read.
    Idle,
    /// The latest message is not a command.
    Ignored,
    /// The latest message was already handled in an earlier cycle.
    AlreadyHandled,
    /// A command ran but produced nothing to post.
    Skipped,
    Posted(String),
    PostFailed(String),
}

pub struct CommandRouter {
    providers: Providers,
    clock: Arc<dyn Clock>,
    room_id: String,
    parser: CommandParser,
    poll_interval: Duration,
    cooldown: Duration,
    last_handled: Option<String>,
}

impl CommandRouter {
    pub fn new(
        providers: Providers,
        clock: Arc<dyn Clock>,
        room_id: String,
        config: &BotConfig,
    ) -> Self {
        Self {
            providers,
            clock,
            room_id,
            parser: CommandParser::from_config(config),
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            cooldown: Duration::from_secs(config.cooldown_secs),
            last_handled: None,
        }
    }

    /// Polls forever. Stopped only by dropping the future.
    pub async fn run(&mut self) {
        tracing::info!("{}", logs::monitoring_room(&self.room_id, self.parser.trigger()));
        loop {
            let outcome = self.run_cycle().await;
            tracing::trace!(?outcome, "Cycle finished");
        }
    }

    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.clock.sleep(self.poll_interval).await;

        let message = match self.providers.chat.latest_message(&self.room_id).await {
            Ok(Some(message)) => message,
            Ok(None) => {
                tracing::debug!("{}", logs::NO_MESSAGES);
                return CycleOutcome::Idle;
            }
            Err(e) => {
                tracing::warn!("Could not read latest message: {}", e);
                return CycleOutcome::Idle;
            }
        };

        if self.last_handled.as_deref() == Some(message.id.as_str()) {
            return CycleOutcome::AlreadyHandled;
        }

        let command = self.parser.parse(&message.text);
        if command == Command::Unrecognized {
            if self.parser.is_addressed(&message.text) {
                tracing::debug!("{}", logs::not_a_number(self.parser.trigger()));
            } else {
                tracing::trace!("{}", logs::latest_message(&message.text));
            }
            return CycleOutcome::Ignored;
        }

        tracing::info!("{}", logs::latest_message(&message.text));
        self.last_handled = Some(message.id);

        let outcome = match self.handle(command).await {
            Some(text) => self.notify(text).await,
            None => CycleOutcome::Skipped,
        };

        self.clock.sleep(self.cooldown).await;
        outcome
    }

    async fn handle(&self, command: Command) -> Option<String> {
        match command {
            Command::LaunchInfoQuery => Some(launch_info(self.providers.launches.as_ref()).await),
            Command::NumericWait(seconds) => {
                self.clock.sleep(Duration::from_secs(seconds)).await;
                self.flyover_report().await
            }
            Command::Unrecognized => None,
        }
    }

    async fn flyover_report(&self) -> Option<String> {
        let fix = fetch_fix(self.providers.orbital.as_ref()).await?;
        let place = resolve_place(self.providers.geocoder.as_ref(), &fix.position).await;
        Some(location_message(&fix.position, &fix.time, &place))
    }

    async fn notify(&self, text: String) -> CycleOutcome {
        tracing::info!("{}", logs::sending(&text));
        match self.providers.chat.send_message(&self.room_id, &text).await {
            Ok(()) => {
                tracing::info!("{}", logs::SENT);
                CycleOutcome::Posted(text)
            }
            Err(e) => {
                tracing::error!("Error posting message: {}", e);
                CycleOutcome::PostFailed(text)
            }
        }
    }
}

/// Runs the poll loop until `shutdown` resolves. A command in flight at that
/// point is dropped without posting.
pub async fn run_until(router: &mut CommandRouter, shutdown: impl Future<Output = ()>) {
    tokio::select! {
        _ = router.run() => {}
        _ = shutdown => tracing::info!("{}", logs::SHUTDOWN),
    }
}

/// Picks the room to monitor: an explicit id wins, otherwise the first room whose
/// title contains `title`.
pub async fn resolve_room(
    chat: &dyn ChatProvider,
    room_id: Option<&str>,
    title: Option<&str>,
) -> Result<String> {
    if let Some(id) = room_id.filter(|id| !id.trim().is_empty()) {
        return Ok(id.trim().to_string());
    }

    let Some(needle) = title.filter(|t| !t.is_empty()) else {
        anyhow::bail!("No room configured - set services.webex.room or services.webex.room_title");
    };

    let rooms = chat.list_rooms().await.context("Failed to list rooms")?;
    for room in &rooms {
        tracing::debug!("Room Type: {} - Room Title: {}", room.kind, room.title);
    }

    let room = rooms
        .into_iter()
        .find(|room| room.title.contains(needle))
        .with_context(|| format!("Sorry, no room with '{needle}' in its title"))?;
    tracing::info!("{}", logs::room_found(&room.title, &room.id));
    Ok(room.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ProviderError;
    use crate::domain::types::{
        ChatMessage, GeocodeRecord, IssFix, LaunchRecord, LaunchpadRecord, ObservationTime,
        Position, RocketRecord, RoomInfo,
    };
    use crate::strings::messages;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    const T: i64 = 1592505756;

    #[derive(Default)]
    struct FakeChat {
        latest: Mutex<Option<ChatMessage>>,
        read_fails: bool,
        send_fails: bool,
        sent: Mutex<Vec<(String, String)>>,
        rooms: Vec<RoomInfo>,
    }

    impl FakeChat {
        fn with(id: &str, text: &str) -> Self {
            let chat = Self::default();
            chat.post(id, text);
            chat
        }

        fn post(&self, id: &str, text: &str) {
            *self.latest.lock().unwrap() = Some(ChatMessage {
                id: id.to_string(),
                text: text.to_string(),
            });
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    fn failure(provider: &'static str) -> ProviderError {
        ProviderError::payload(provider, "unavailable")
    }

    #[async_trait]
    impl ChatProvider for FakeChat {
        async fn latest_message(&self, _room_id: &str) -> Result<Option<ChatMessage>, ProviderError> {
            if self.read_fails {
                return Err(failure("chat"));
            }
            Ok(self.latest.lock().unwrap().clone())
        }

        async fn send_message(&self, room_id: &str, text: &str) -> Result<(), ProviderError> {
            if self.send_fails {
                return Err(failure("chat"));
            }
            self.sent
                .lock()
                .unwrap()
                .push((room_id.to_string(), text.to_string()));
            Ok(())
        }

        async fn list_rooms(&self) -> Result<Vec<RoomInfo>, ProviderError> {
            Ok(self.rooms.clone())
        }
    }

    struct FakeOrbital(Option<IssFix>);

    #[async_trait]
    impl OrbitalProvider for FakeOrbital {
        async fn current_position(&self) -> Result<IssFix, ProviderError> {
            self.0.clone().ok_or_else(|| failure("iss"))
        }
    }

    struct FakeGeocoder(Vec<GeocodeRecord>);

    #[async_trait]
    impl GeocodeProvider for FakeGeocoder {
        async fn reverse(&self, _position: &Position) -> Result<Vec<GeocodeRecord>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    struct FakeLaunches;

    #[async_trait]
    impl LaunchProvider for FakeLaunches {
        async fn next_launch(&self) -> Result<LaunchRecord, ProviderError> {
            Ok(LaunchRecord {
                name: "Starlink 10-1".to_string(),
                date_utc: "2024-10-01T00:00:00.000Z".to_string(),
                rocket: Some("falcon9".to_string()),
                launchpad: None,
            })
        }

        async fn rocket(&self, _id: &str) -> Result<RocketRecord, ProviderError> {
            Err(failure("rocket"))
        }

        async fn launchpad(&self, _id: &str) -> Result<LaunchpadRecord, ProviderError> {
            Err(failure("launchpad"))
        }
    }

    #[derive(Default)]
    struct RecordingClock {
        sleeps: Mutex<Vec<Duration>>,
    }

    impl RecordingClock {
        fn seconds(&self) -> Vec<u64> {
            self.sleeps.lock().unwrap().iter().map(Duration::as_secs).collect()
        }
    }

    #[async_trait]
    impl Clock for RecordingClock {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
        }
    }

    fn us_only() -> Vec<GeocodeRecord> {
        vec![GeocodeRecord {
            country_code: Some("us".to_string()),
            ..GeocodeRecord::default()
        }]
    }

    fn fix() -> IssFix {
        IssFix {
            position: Position::new("10", "20"),
            time: ObservationTime::new(T),
        }
    }

    struct Harness {
        chat: Arc<FakeChat>,
        clock: Arc<RecordingClock>,
        router: CommandRouter,
    }

    fn router(
        chat: Arc<FakeChat>,
        clock: Arc<dyn Clock>,
        iss: Option<IssFix>,
        geo: Vec<GeocodeRecord>,
    ) -> CommandRouter {
        let providers = Providers {
            chat,
            orbital: Arc::new(FakeOrbital(iss)),
            geocoder: Arc::new(FakeGeocoder(geo)),
            launches: Arc::new(FakeLaunches),
        };
        let config = BotConfig {
            poll_interval_secs: 1,
            cooldown_secs: 4,
            ..BotConfig::default()
        };
        CommandRouter::new(providers, clock, "room-1".to_string(), &config)
    }

    fn harness(chat: FakeChat, iss: Option<IssFix>, geo: Vec<GeocodeRecord>) -> Harness {
        let chat = Arc::new(chat);
        let clock = Arc::new(RecordingClock::default());
        let router = router(chat.clone(), clock.clone(), iss, geo);
        Harness {
            chat,
            clock,
            router,
        }
    }

    #[tokio::test]
    async fn test_wait_command_end_to_end() {
        let mut h = harness(FakeChat::with("m1", "/3"), Some(fix()), us_only());

        let outcome = h.router.run_cycle().await;

        let expected = "On Thu Jun 18 18:42:36 2020, the ISS was flying over the following country: United States of America\n(10°, 20°)";
        assert_eq!(outcome, CycleOutcome::Posted(expected.to_string()));
        assert_eq!(
            h.chat.sent(),
            vec![("room-1".to_string(), expected.to_string())]
        );
        // poll, requested wait, cooldown
        assert_eq!(h.clock.seconds(), vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn test_wait_is_clamped_to_five_seconds() {
        let mut h = harness(FakeChat::with("m1", "/7"), Some(fix()), us_only());
        h.router.run_cycle().await;
        assert_eq!(h.clock.seconds(), vec![1, 5, 4]);
    }

    #[tokio::test]
    async fn test_non_numeric_suffix_is_inert() {
        let mut h = harness(FakeChat::with("m1", "/abc"), Some(fix()), us_only());
        assert_eq!(h.router.run_cycle().await, CycleOutcome::Ignored);
        assert!(h.chat.sent().is_empty());
        assert_eq!(h.clock.seconds(), vec![1]);
    }

    #[tokio::test]
    async fn test_plain_chatter_is_ignored() {
        let mut h = harness(FakeChat::with("m1", "hello there"), Some(fix()), us_only());
        assert_eq!(h.router.run_cycle().await, CycleOutcome::Ignored);
        assert!(h.chat.sent().is_empty());
    }

    #[tokio::test]
    async fn test_empty_room_and_read_failure_are_idle() {
        let mut h = harness(FakeChat::default(), Some(fix()), us_only());
        assert_eq!(h.router.run_cycle().await, CycleOutcome::Idle);

        let failing = FakeChat {
            read_fails: true,
            ..FakeChat::default()
        };
        let mut h = harness(failing, Some(fix()), us_only());
        assert_eq!(h.router.run_cycle().await, CycleOutcome::Idle);
        assert_eq!(h.clock.seconds(), vec![1]);
    }

    #[tokio::test]
    async fn test_orbital_failure_skips_notification() {
        let mut h = harness(FakeChat::with("m1", "/2"), None, us_only());
        assert_eq!(h.router.run_cycle().await, CycleOutcome::Skipped);
        assert!(h.chat.sent().is_empty());
        assert_eq!(h.clock.seconds(), vec![1, 2, 4]);
    }

    #[tokio::test]
    async fn test_launch_command_posts_summary() {
        let mut h = harness(FakeChat::with("m1", "/launch"), None, vec![]);
        let outcome = h.router.run_cycle().await;

        let CycleOutcome::Posted(text) = outcome else {
            panic!("expected a posted message, got {outcome:?}");
        };
        assert!(text.contains("Starlink 10-1"));
        assert!(text.contains("2024-10-01T00:00:00.000Z"));
        assert!(text.contains("Rocket: Unknown Rocket"));
        assert_eq!(h.clock.seconds(), vec![1, 4]);
    }

    #[tokio::test]
    async fn test_same_message_is_handled_once() {
        let mut h = harness(FakeChat::with("m1", "/1"), Some(fix()), vec![]);
        assert!(matches!(h.router.run_cycle().await, CycleOutcome::Posted(_)));
        assert_eq!(h.router.run_cycle().await, CycleOutcome::AlreadyHandled);
        assert_eq!(h.chat.sent().len(), 1);

        h.chat.post("m2", "/1");
        assert!(matches!(h.router.run_cycle().await, CycleOutcome::Posted(_)));
        assert_eq!(h.chat.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_water_report_when_geocoder_finds_nothing() {
        let mut h = harness(FakeChat::with("m1", "/0"), Some(fix()), vec![]);
        let outcome = h.router.run_cycle().await;
        assert_eq!(
            outcome,
            CycleOutcome::Posted(
                "On Thu Jun 18 18:42:36 2020, the ISS was flying over a body of water at latitude 10° and longitude 20°.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_post_failure_keeps_loop_alive() {
        let chat = FakeChat {
            send_fails: true,
            ..FakeChat::with("m1", "/launch")
        };
        let mut h = harness(chat, None, vec![]);
        let outcome = h.router.run_cycle().await;
        assert!(matches!(outcome, CycleOutcome::PostFailed(_)));
        assert_eq!(h.clock.seconds(), vec![1, 4]);
        assert_eq!(h.router.run_cycle().await, CycleOutcome::AlreadyHandled);
    }

    #[tokio::test]
    async fn test_launch_failure_text_is_posted() {
        struct DownLaunches;

        #[async_trait]
        impl LaunchProvider for DownLaunches {
            async fn next_launch(&self) -> Result<LaunchRecord, ProviderError> {
                Err(failure("launches"))
            }
            async fn rocket(&self, _id: &str) -> Result<RocketRecord, ProviderError> {
                Err(failure("rocket"))
            }
            async fn launchpad(&self, _id: &str) -> Result<LaunchpadRecord, ProviderError> {
                Err(failure("launchpad"))
            }
        }

        let mut h = harness(FakeChat::with("m1", "/launch"), None, vec![]);
        h.router.providers.launches = Arc::new(DownLaunches);
        assert_eq!(
            h.router.run_cycle().await,
            CycleOutcome::Posted(messages::LAUNCH_UNAVAILABLE.to_string())
        );
    }

    /// Returns from the poll sleep at once and parks forever on any longer sleep.
    #[derive(Default)]
    struct ParkingClock {
        sleeps: Mutex<Vec<Duration>>,
        parked: Notify,
    }

    #[async_trait]
    impl Clock for ParkingClock {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
            if duration > Duration::from_secs(1) {
                self.parked.notify_one();
                std::future::pending::<()>().await;
            }
        }
    }

    #[tokio::test]
    async fn test_shutdown_abandons_command_in_flight() {
        let chat = Arc::new(FakeChat::with("m1", "/5"));
        let clock = Arc::new(ParkingClock::default());
        let mut router = router(chat.clone(), clock.clone(), Some(fix()), us_only());

        let parked = clock.clone();
        run_until(&mut router, async move { parked.parked.notified().await }).await;

        assert!(chat.sent().is_empty());
        assert_eq!(
            *clock.sleeps.lock().unwrap(),
            vec![Duration::from_secs(1), Duration::from_secs(5)]
        );
        assert_eq!(router.last_handled.as_deref(), Some("m1"));
    }

    fn room(id: &str, title: &str) -> RoomInfo {
        RoomInfo {
            id: id.to_string(),
            title: title.to_string(),
            kind: "group".to_string(),
        }
    }

    #[tokio::test]
    async fn test_resolve_room_prefers_explicit_id() {
        let chat = FakeChat::default();
        let id = resolve_room(&chat, Some("abc"), Some("ISS")).await.unwrap();
        assert_eq!(id, "abc");
    }

    #[tokio::test]
    async fn test_resolve_room_by_title_substring() {
        let chat = FakeChat {
            rooms: vec![room("r1", "General"), room("r2", "ISS Watchers"), room("r3", "ISS Too")],
            ..FakeChat::default()
        };
        let id = resolve_room(&chat, None, Some("ISS")).await.unwrap();
        assert_eq!(id, "r2");
    }

    #[tokio::test]
    async fn test_resolve_room_without_match_fails() {
        let chat = FakeChat {
            rooms: vec![room("r1", "General")],
            ..FakeChat::default()
        };
        assert!(resolve_room(&chat, None, Some("ISS")).await.is_err());
        assert!(resolve_room(&chat, None, None).await.is_err());
    }
}
