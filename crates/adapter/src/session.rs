//! Session module - one client's game, driven by protocol requests
//!
//! A [`Session`] is owned by exactly one connection. It is synchronous: the
//! server feeds it one line at a time and writes back the single response.

use log::{debug, warn};

use wagara_blast_core::daily::generate_daily_challenge;
use wagara_blast_core::levels::load_level;
use wagara_blast_core::rng::today_string;
use wagara_blast_core::{BoosterTarget, EngineError, GameState, LevelConfig};
use wagara_blast_types::{BoosterKind, FeedbackEvent, GameMode, Position};

use crate::protocol::*;

pub struct Session {
    client_id: u64,
    handshaken: bool,
    game: Option<GameState>,
}

impl Session {
    pub fn new(client_id: u64) -> Self {
        Self {
            client_id,
            handshaken: false,
            game: None,
        }
    }

    pub fn client_id(&self) -> u64 {
        self.client_id
    }

    pub fn is_handshaken(&self) -> bool {
        self.handshaken
    }

    /// Current game, if one was started
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// Parse and apply one raw line
    pub fn handle_line(&mut self, line: &str) -> Response {
        match parse_request(line) {
            Ok(request) => self.handle(request),
            Err(e) => {
                warn!("client {}: malformed request: {}", self.client_id, e);
                create_error(seq_best_effort(line), ErrorCode::ParseError, e.to_string())
            }
        }
    }

    /// Apply one parsed request
    pub fn handle(&mut self, request: Request) -> Response {
        let seq = request.seq();
        if !self.handshaken && !matches!(request, Request::Hello(_)) {
            return create_error(seq, ErrorCode::HandshakeRequired, "send hello first");
        }
        debug!("client {}: {} (seq {})", self.client_id, request.type_name(), seq);

        match request {
            Request::Hello(hello) => {
                self.handshaken = true;
                if let Some(name) = hello.client.as_deref() {
                    debug!("client {} identifies as {}", self.client_id, name);
                }
                Response::Welcome(create_welcome(seq, self.client_id))
            }
            Request::NewGame(req) => match start_game(&req) {
                Ok(game) => {
                    let response = observation(seq, &game, &[], None);
                    self.game = Some(game);
                    response
                }
                Err((code, message)) => create_error(seq, code, message),
            },
            Request::Place(req) => {
                let Some(game) = self.game.as_ref() else {
                    return no_game(seq);
                };
                let turn = game.place_piece(req.piece, Position::new(req.row, req.col));
                let response = observation(seq, &turn.state, &turn.events, None);
                self.game = Some(turn.state);
                response
            }
            Request::Booster(req) => {
                let Some(game) = self.game.as_ref() else {
                    return no_game(seq);
                };
                let kind = BoosterKind::from(req.booster);
                let result = game.use_booster(kind, booster_target(kind, req.row, req.col));
                let suggestion = result.suggestion.as_ref().map(SuggestionView::from);
                let response = observation(seq, &result.state, &result.events, suggestion);
                self.game = Some(result.state);
                response
            }
            Request::Placements(_) => match self.game.as_ref() {
                Some(game) => Response::Placements(PlacementsMessage {
                    seq,
                    placements: game
                        .available_placements()
                        .iter()
                        .map(PlacementView::from)
                        .collect(),
                }),
                None => no_game(seq),
            },
            Request::Observe(_) => match self.game.as_ref() {
                Some(game) => observation(seq, game, &[], None),
                None => no_game(seq),
            },
        }
    }
}

fn no_game(seq: u64) -> Response {
    create_error(seq, ErrorCode::NoGame, "no game in progress, send new_game")
}

fn observation(
    seq: u64,
    state: &GameState,
    events: &[FeedbackEvent],
    suggestion: Option<SuggestionView>,
) -> Response {
    Response::Observation(ObservationMessage {
        seq,
        state: StateView::from(&state.snapshot()),
        events: events.iter().map(EventView::from).collect(),
        suggestion,
    })
}

/// Map the wire coordinates onto the booster's target shape
///
/// A missing coordinate yields `BoosterTarget::None`, which the engine
/// rejects with an `invalidDrop` event for targeted boosters.
fn booster_target(kind: BoosterKind, row: Option<i32>, col: Option<i32>) -> BoosterTarget {
    match (kind, row, col) {
        (BoosterKind::StoneBreaker, Some(row), Some(col)) => BoosterTarget::Cell(Position::new(row, col)),
        (BoosterKind::Lightning, Some(row), _) => BoosterTarget::Line(row),
        (BoosterKind::Wave, _, Some(col)) => BoosterTarget::Line(col),
        _ => BoosterTarget::None,
    }
}

fn engine_error(err: EngineError) -> (ErrorCode, String) {
    let code = match &err {
        EngineError::LevelNotFound { .. } => ErrorCode::UnknownLevel,
        EngineError::InvalidDate(_) => ErrorCode::InvalidDate,
        EngineError::BoosterDepleted(_) => ErrorCode::InvalidRequest,
    };
    (code, err.to_string())
}

fn start_game(req: &NewGameRequest) -> Result<GameState, (ErrorCode, String)> {
    let mode = GameMode::from(req.mode);
    let level: Option<LevelConfig> = match mode {
        GameMode::Classic => None,
        GameMode::Level => {
            let id = req.level.ok_or_else(|| {
                (
                    ErrorCode::InvalidRequest,
                    "level mode requires a level id".to_string(),
                )
            })?;
            Some(load_level(id).map_err(engine_error)?)
        }
        GameMode::Daily => {
            let date = req.date.clone().unwrap_or_else(today_string);
            Some(generate_daily_challenge(&date).map_err(engine_error)?)
        }
    };

    Ok(match req.seed {
        Some(seed) => GameState::new_seeded(mode, level, seed),
        None => GameState::new(mode, level),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session() -> Session {
        let mut session = Session::new(1);
        let welcome = session.handle_line(r#"{"type":"hello","seq":1}"#);
        assert!(matches!(welcome, Response::Welcome(_)));
        session
    }

    fn expect_observation(response: Response) -> ObservationMessage {
        match response {
            Response::Observation(obs) => obs,
            other => panic!("expected observation, got {:?}", other),
        }
    }

    fn expect_error(response: Response) -> ErrorCode {
        match response {
            Response::Error(err) => err.code,
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_handshake_required() {
        let mut session = Session::new(1);
        let response = session.handle_line(r#"{"type":"observe","seq":5}"#);
        assert_eq!(response.seq(), 5);
        assert_eq!(expect_error(response), ErrorCode::HandshakeRequired);
        assert!(!session.is_handshaken());
    }

    #[test]
    fn test_no_game_before_new_game() {
        let mut session = ready_session();
        for line in [
            r#"{"type":"observe"}"#,
            r#"{"type":"placements"}"#,
            r#"{"type":"place","piece":0,"row":0,"col":0}"#,
            r#"{"type":"booster","booster":"guide"}"#,
        ] {
            assert_eq!(expect_error(session.handle_line(line)), ErrorCode::NoGame);
        }
    }

    #[test]
    fn test_parse_error_echoes_seq() {
        let mut session = ready_session();
        let response = session.handle_line(r#"{"type":"warp","seq":42}"#);
        assert_eq!(response.seq(), 42);
        assert_eq!(expect_error(response), ErrorCode::ParseError);
    }

    #[test]
    fn test_new_game_classic_seeded() {
        let mut session = ready_session();
        let obs = expect_observation(
            session.handle_line(r#"{"type":"new_game","seq":2,"mode":"classic","seed":7}"#),
        );
        assert_eq!(obs.seq, 2);
        assert!(obs.events.is_empty());
        assert_eq!(obs.state.mode, "classic");
        assert_eq!(obs.state.status, "active");
        assert_eq!(obs.state.score, 0);
        assert_eq!(obs.state.pieces.len(), 3);
        assert!(session.game().is_some());

        // Same seed, same tray
        let mut other = ready_session();
        let again = expect_observation(
            other.handle_line(r#"{"type":"new_game","mode":"classic","seed":7}"#),
        );
        assert_eq!(obs.state.pieces, again.state.pieces);
    }

    #[test]
    fn test_new_game_errors() {
        let mut session = ready_session();
        assert_eq!(
            expect_error(session.handle_line(r#"{"type":"new_game","mode":"level"}"#)),
            ErrorCode::InvalidRequest
        );
        assert_eq!(
            expect_error(session.handle_line(r#"{"type":"new_game","mode":"level","level":99}"#)),
            ErrorCode::UnknownLevel
        );
        assert_eq!(
            expect_error(
                session.handle_line(r#"{"type":"new_game","mode":"daily","date":"2024-13-01"}"#)
            ),
            ErrorCode::InvalidDate
        );
        assert!(session.game().is_none());
    }

    #[test]
    fn test_level_and_daily_games() {
        let mut session = ready_session();
        let obs = expect_observation(
            session.handle_line(r#"{"type":"new_game","mode":"level","level":5,"seed":1}"#),
        );
        assert_eq!(obs.state.level, Some(5));
        assert_eq!(obs.state.target, Some(2000));

        let obs = expect_observation(
            session.handle_line(r#"{"type":"new_game","mode":"daily","date":"2024-01-01"}"#),
        );
        assert_eq!(obs.state.level, Some(-1));
        assert_eq!(obs.state.mode, "daily");
    }

    #[test]
    fn test_place_from_placements() {
        let mut session = ready_session();
        session.handle_line(r#"{"type":"new_game","mode":"classic","seed":3}"#);
        let placements = match session.handle_line(r#"{"type":"placements","seq":3}"#) {
            Response::Placements(p) => p,
            other => panic!("expected placements, got {:?}", other),
        };
        let first = &placements.placements[0];
        let [row, col] = first.anchors[0];
        let line = format!(
            r#"{{"type":"place","seq":4,"piece":{},"row":{},"col":{}}}"#,
            first.piece, row, col
        );
        let obs = expect_observation(session.handle_line(&line));
        assert_eq!(obs.events[0].kind, "place");
        assert_eq!(obs.state.moves, 1);
        assert!(obs.state.score > 0);
        assert_eq!(session.game().map(|g| g.moves()), Some(1));
    }

    #[test]
    fn test_invalid_place_reports_invalid_drop() {
        let mut session = ready_session();
        session.handle_line(r#"{"type":"new_game","mode":"classic","seed":3}"#);
        let obs = expect_observation(
            session.handle_line(r#"{"type":"place","piece":0,"row":50,"col":50}"#),
        );
        assert_eq!(obs.events.len(), 1);
        assert_eq!(obs.events[0].kind, "invalidDrop");
        assert_eq!(obs.state.moves, 0);
    }

    #[test]
    fn test_boosters() {
        let mut session = ready_session();
        session.handle_line(r#"{"type":"new_game","mode":"classic","seed":11}"#);

        let obs = expect_observation(session.handle_line(r#"{"type":"booster","booster":"guide"}"#));
        assert!(obs.suggestion.is_some());
        assert_eq!(obs.state.boosters["guide"], 2);

        // Lightning without a row is rejected and not consumed
        let obs = expect_observation(
            session.handle_line(r#"{"type":"booster","booster":"lightning"}"#),
        );
        assert_eq!(obs.events[0].kind, "invalidDrop");
        assert_eq!(obs.state.boosters["lightning"], 1);

        let obs = expect_observation(
            session.handle_line(r#"{"type":"booster","booster":"lightning","row":2}"#),
        );
        assert_eq!(obs.state.boosters["lightning"], 0);
        assert!(obs.suggestion.is_none());
    }

    #[test]
    fn test_booster_target_mapping() {
        assert_eq!(
            booster_target(BoosterKind::StoneBreaker, Some(1), Some(2)),
            BoosterTarget::Cell(Position::new(1, 2))
        );
        assert_eq!(booster_target(BoosterKind::StoneBreaker, Some(1), None), BoosterTarget::None);
        assert_eq!(booster_target(BoosterKind::Lightning, Some(4), None), BoosterTarget::Line(4));
        assert_eq!(booster_target(BoosterKind::Wave, None, Some(6)), BoosterTarget::Line(6));
        assert_eq!(booster_target(BoosterKind::Wave, Some(6), None), BoosterTarget::None);
        assert_eq!(booster_target(BoosterKind::Shuffle, Some(1), Some(1)), BoosterTarget::None);
    }
}
