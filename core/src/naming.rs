use futures_channel::{mpsc, oneshot};

use crate::*;

/// Sent to the player whenever a qualifying score needs a name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameRequest {
    pub tiles_revealed: CellCount,
    /// Why the previous candidate was refused, `None` on the first ask.
    pub rejection: Option<GameError>,
}

/// Source of player names for the leaderboard, usually a prompt in the UI.
pub trait NameSource {
    /// Resolves to a candidate name, or `None` when the player cancels.
    fn request_name(&mut self, request: NameRequest) -> impl Future<Output = Option<String>>;
}

/// A name request waiting for the UI to answer.
#[derive(Debug)]
pub struct PendingName {
    pub request: NameRequest,
    reply: oneshot::Sender<String>,
}

impl PendingName {
    pub fn answer(self, name: impl Into<String>) {
        // the requester gave up, nothing left to answer
        let _ = self.reply.send(name.into());
    }

    /// Dropping the request has the same effect.
    pub fn cancel(self) {}
}

/// Forwards requests over a channel so the UI can answer them from its own event loop.
#[derive(Clone, Debug)]
pub struct ChannelNameSource {
    requests: mpsc::UnboundedSender<PendingName>,
}

impl ChannelNameSource {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingName>) {
        let (requests, receiver) = mpsc::unbounded();
        (Self { requests }, receiver)
    }
}

impl NameSource for ChannelNameSource {
    async fn request_name(&mut self, request: NameRequest) -> Option<String> {
        let (reply, answer) = oneshot::channel();
        if self
            .requests
            .unbounded_send(PendingName { request, reply })
            .is_err()
        {
            log::warn!("Name prompt is gone, treating as cancelled");
            return None;
        }
        answer.await.ok()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use futures_util::StreamExt;

    use super::*;

    /// Replays canned answers and remembers every request.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedNames {
        pub answers: VecDeque<Option<&'static str>>,
        pub requests: Vec<NameRequest>,
    }

    impl ScriptedNames {
        pub fn new(answers: impl IntoIterator<Item = Option<&'static str>>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                requests: Vec::new(),
            }
        }
    }

    impl NameSource for ScriptedNames {
        async fn request_name(&mut self, request: NameRequest) -> Option<String> {
            self.requests.push(request);
            self.answers.pop_front().flatten().map(String::from)
        }
    }

    #[tokio::test]
    async fn record_retries_until_unique_name() {
        let mut leaderboard = Leaderboard::new(5);
        leaderboard.submit("AMY", 50).unwrap();
        let mut names = ScriptedNames::new([Some("amy"), Some(" "), Some("bob")]);

        let recording = leaderboard.record(&mut names, 60).await;

        assert_eq!(
            recording,
            Recording::Recorded {
                name: "BOB".into(),
                rank: 0
            }
        );
        let rejections: Vec<_> = names.requests.iter().map(|r| r.rejection.clone()).collect();
        assert_eq!(
            rejections,
            [
                None,
                Some(GameError::DuplicateName("AMY".into())),
                Some(GameError::EmptyName),
            ]
        );
    }

    #[tokio::test]
    async fn cancelled_prompt_records_nothing() {
        let mut leaderboard = Leaderboard::new(5);
        let mut names = ScriptedNames::new([Some("amy"), None]);
        leaderboard.submit("AMY", 50).unwrap();

        let recording = leaderboard.record(&mut names, 60).await;

        assert_eq!(recording, Recording::Cancelled);
        assert_eq!(leaderboard.len(), 1);
    }

    #[tokio::test]
    async fn low_score_never_prompts() {
        let mut leaderboard = Leaderboard::new(1);
        leaderboard.submit("AMY", 50).unwrap();
        let mut names = ScriptedNames::new([Some("bob")]);

        assert_eq!(leaderboard.record(&mut names, 50).await, Recording::NotQualified);
        assert!(names.requests.is_empty());
    }

    #[tokio::test]
    async fn channel_source_round_trip() {
        let (mut source, mut prompts) = ChannelNameSource::new();

        let ui = async {
            let pending = prompts.next().await.unwrap();
            assert_eq!(pending.request.tiles_revealed, 42);
            pending.answer("eve");
        };
        let (name, ()) = futures_util::join!(
            source.request_name(NameRequest {
                tiles_revealed: 42,
                rejection: None,
            }),
            ui
        );

        assert_eq!(name.as_deref(), Some("eve"));
    }

    #[tokio::test]
    async fn channel_source_cancel_and_closed_prompt() {
        let (mut source, mut prompts) = ChannelNameSource::new();
        let request = NameRequest {
            tiles_revealed: 1,
            rejection: None,
        };

        let ui = async { prompts.next().await.unwrap().cancel() };
        let (name, ()) = futures_util::join!(source.request_name(request.clone()), ui);
        assert_eq!(name, None);

        drop(prompts);
        assert_eq!(source.request_name(request).await, None);
    }
}
