use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tonic::{Request, Response, Status};

use badatro_env::config::ServerConfig;
use badatro_env::game::{
    evaluate_hand, parse_weather_payload, resolve_jokers, AmbientState, BlindType, Card, GameError,
    HandResult, JokerSlot, Stage, WeatherReport, DEFAULT_AMBIENT_MULTIPLIER,
};
use badatro_env::proto::badatro_server::{Badatro, BadatroServer};
use badatro_env::proto::{
    CardMsg, EndGameResponse, EvaluateHandRequest, EvaluateHandResponse, GameStateMsg,
    GameStateResponse, HandResultMsg, JokerMsg, NewGameRequest, PlayResponse, ScoreBatchRequest,
    ScoreBatchResponse, ScoreRequest, ScoreResponse, SelectBlindRequest, SelectionRequest,
    SessionRequest, SetWeatherRequest, ShopItemMsg, ShopRequest,
};
use badatro_env::service::{score_batch, score_play, GameState, PlayScore, ScoreInput};

// ============================================================================
// 訊息轉換
// ============================================================================

fn to_status(err: GameError) -> Status {
    match err {
        GameError::InvalidRank(_)
        | GameError::InvalidSuit(_)
        | GameError::InvalidSelection(_)
        | GameError::IndexOutOfRange(_) => Status::invalid_argument(err.to_string()),
        GameError::UnknownSession(_) => Status::not_found(err.to_string()),
        _ => Status::failed_precondition(err.to_string()),
    }
}

fn card_from_msg(msg: &CardMsg) -> Result<Card, GameError> {
    if msg.is_joker {
        return Ok(Card::joker());
    }
    let rank = u8::try_from(msg.rank).unwrap_or(u8::MAX);
    let suit = u8::try_from(msg.suit).unwrap_or(u8::MAX);
    Card::new(rank, suit)
}

fn cards_from_msgs(msgs: &[CardMsg]) -> Result<Vec<Card>, Status> {
    msgs.iter()
        .map(card_from_msg)
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_status)
}

fn card_to_msg(card: &Card) -> CardMsg {
    CardMsg {
        rank: card.rank() as u32,
        suit: card.suit().to_index() as u32,
        is_joker: card.is_joker(),
    }
}

fn joker_to_msg(slot: &JokerSlot) -> JokerMsg {
    JokerMsg {
        name: slot.id.name().to_string(),
        active: slot.active,
    }
}

fn hand_to_msg(hand: &HandResult) -> HandResultMsg {
    HandResultMsg {
        hand_type: hand.id.to_index() as i32,
        name: hand.id.name().to_string(),
        base_chips: hand.base_chips,
        base_mult: hand.base_mult,
        cards: hand.cards.iter().map(card_to_msg).collect(),
    }
}

fn score_to_msg(result: &PlayScore) -> ScoreResponse {
    ScoreResponse {
        score: result.score,
        hand: Some(hand_to_msg(&result.hand)),
        base_chips: result.base_chips,
        total_mult: result.total_mult,
        chip_bonus: result.chip_bonus,
    }
}

fn score_input(request: &ScoreRequest) -> Result<ScoreInput, Status> {
    Ok(ScoreInput {
        cards: cards_from_msgs(&request.cards)?,
        jokers: resolve_jokers(request.jokers.iter().map(|j| (j.name.as_str(), j.active))),
        ambient: AmbientState::new(request.discards_remaining),
        ambient_multiplier: request.ambient_multiplier.unwrap_or(DEFAULT_AMBIENT_MULTIPLIER),
    })
}

fn state_to_msg(session_id: u64, state: &GameState) -> GameStateMsg {
    GameStateMsg {
        session_id,
        stage: state.stage.to_int(),
        game_end: match state.stage {
            Stage::End(end) => end.to_int(),
            _ => 0,
        },
        ante: state.ante.to_int(),
        blind_type: state.blind_type.map(|b| b.to_int()).unwrap_or(-1),
        blind_target: state.required_score(),
        score: state.score,
        plays_left: state.plays_left,
        discards_left: state.discards_left,
        money: state.money,
        hand: state.hand().iter().map(card_to_msg).collect(),
        jokers: state.jokers.iter().map(joker_to_msg).collect(),
        shop: state
            .shop
            .items
            .iter()
            .map(|item| ShopItemMsg {
                name: item.joker.name().to_string(),
                description: item.joker.description().to_string(),
                cost: item.cost,
            })
            .collect(),
        ambient_multiplier: state.ambient_multiplier,
        round: state.round,
        deck_remaining: state.deck_remaining() as u32,
    }
}

fn indices_from(raw: &[u32]) -> Vec<usize> {
    raw.iter().map(|&i| i as usize).collect()
}

// ============================================================================
// gRPC 服務
// ============================================================================

struct BadatroService {
    sessions: DashMap<u64, GameState>,
    next_id: AtomicU64,
    config: ServerConfig,
}

impl BadatroService {
    fn new(config: ServerConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            next_id: AtomicU64::new(1),
            config,
        }
    }

    /// 依設定更新環境倍率：有固定值時使用固定值，否則依天氣與當地時段計算
    fn apply_ambient(&self, state: &mut GameState, report: Option<WeatherReport>) {
        match self.config.ambient_override {
            Some(value) => {
                state.weather = report;
                state.set_ambient_multiplier(value);
            }
            None => state.set_weather(report, self.config.local_seconds_of_day()),
        }
    }

    /// 對指定 session 執行動作，回傳結果與更新後的狀態
    fn with_session<T, F>(&self, session_id: u64, action: F) -> Result<(T, GameStateMsg), Status>
    where
        F: FnOnce(&mut GameState) -> Result<T, GameError>,
    {
        let mut entry = self
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| to_status(GameError::UnknownSession(session_id)))?;
        let value = action(entry.value_mut()).map_err(to_status)?;
        Ok((value, state_to_msg(session_id, entry.value())))
    }

    fn state_response<T, F>(&self, session_id: u64, action: F) -> Result<Response<GameStateResponse>, Status>
    where
        F: FnOnce(&mut GameState) -> Result<T, GameError>,
    {
        let (_, state) = self.with_session(session_id, action)?;
        Ok(Response::new(GameStateResponse { state: Some(state) }))
    }
}

#[tonic::async_trait]
impl Badatro for BadatroService {
    async fn evaluate_hand(
        &self,
        request: Request<EvaluateHandRequest>,
    ) -> Result<Response<EvaluateHandResponse>, Status> {
        let cards = cards_from_msgs(&request.into_inner().cards)?;
        let result = evaluate_hand(&cards);
        Ok(Response::new(EvaluateHandResponse {
            result: Some(hand_to_msg(&result)),
        }))
    }

    async fn score(&self, request: Request<ScoreRequest>) -> Result<Response<ScoreResponse>, Status> {
        let input = score_input(&request.into_inner())?;
        let result = score_play(&input.cards, &input.jokers, &input.ambient, input.ambient_multiplier);
        Ok(Response::new(score_to_msg(&result)))
    }

    async fn score_batch(
        &self,
        request: Request<ScoreBatchRequest>,
    ) -> Result<Response<ScoreBatchResponse>, Status> {
        let inputs = request
            .into_inner()
            .requests
            .iter()
            .map(score_input)
            .collect::<Result<Vec<_>, _>>()?;

        let results = tokio::task::spawn_blocking(move || score_batch(&inputs))
            .await
            .map_err(|e| Status::internal(format!("batch scoring failed: {}", e)))?;

        Ok(Response::new(ScoreBatchResponse {
            responses: results.iter().map(score_to_msg).collect(),
        }))
    }

    async fn new_game(
        &self,
        request: Request<NewGameRequest>,
    ) -> Result<Response<GameStateResponse>, Status> {
        let seed = request.into_inner().seed;
        let session_id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let mut state = GameState::new(seed);
        self.apply_ambient(&mut state, None);
        let msg = state_to_msg(session_id, &state);
        self.sessions.insert(session_id, state);

        log::info!("session {} started (seed {})", session_id, seed);
        Ok(Response::new(GameStateResponse { state: Some(msg) }))
    }

    async fn select_blind(
        &self,
        request: Request<SelectBlindRequest>,
    ) -> Result<Response<GameStateResponse>, Status> {
        let SelectBlindRequest {
            session_id,
            blind_type,
        } = request.into_inner();
        let blind = BlindType::from_int(blind_type)
            .ok_or_else(|| Status::invalid_argument(format!("unknown blind type {}", blind_type)))?;
        self.state_response(session_id, |state| state.select_blind(blind))
    }

    async fn play(&self, request: Request<SelectionRequest>) -> Result<Response<PlayResponse>, Status> {
        let SelectionRequest { session_id, indices } = request.into_inner();
        let indices = indices_from(&indices);
        let (outcome, state) = self.with_session(session_id, |state| state.play(&indices))?;
        Ok(Response::new(PlayResponse {
            state: Some(state),
            score: Some(score_to_msg(&outcome.score)),
            blind_cleared: outcome.blind_cleared,
        }))
    }

    async fn discard(
        &self,
        request: Request<SelectionRequest>,
    ) -> Result<Response<GameStateResponse>, Status> {
        let SelectionRequest { session_id, indices } = request.into_inner();
        let indices = indices_from(&indices);
        self.state_response(session_id, |state| state.discard(&indices))
    }

    async fn buy_joker(
        &self,
        request: Request<ShopRequest>,
    ) -> Result<Response<GameStateResponse>, Status> {
        let ShopRequest { session_id, index } = request.into_inner();
        self.state_response(session_id, |state| state.buy_joker(index as usize))
    }

    async fn sell_joker(
        &self,
        request: Request<ShopRequest>,
    ) -> Result<Response<GameStateResponse>, Status> {
        let ShopRequest { session_id, index } = request.into_inner();
        self.state_response(session_id, |state| state.sell_joker(index as usize))
    }

    async fn leave_shop(
        &self,
        request: Request<SessionRequest>,
    ) -> Result<Response<GameStateResponse>, Status> {
        let session_id = request.into_inner().session_id;
        self.state_response(session_id, |state| state.leave_shop())
    }

    async fn set_weather(
        &self,
        request: Request<SetWeatherRequest>,
    ) -> Result<Response<GameStateResponse>, Status> {
        let SetWeatherRequest { session_id, payload } = request.into_inner();
        let report = parse_weather_payload(&payload);
        self.state_response(session_id, |state| {
            self.apply_ambient(state, report);
            Ok(())
        })
    }

    async fn get_state(
        &self,
        request: Request<SessionRequest>,
    ) -> Result<Response<GameStateResponse>, Status> {
        let session_id = request.into_inner().session_id;
        self.state_response(session_id, |_| Ok(()))
    }

    async fn end_game(
        &self,
        request: Request<SessionRequest>,
    ) -> Result<Response<EndGameResponse>, Status> {
        let session_id = request.into_inner().session_id;
        let removed = self.sessions.remove(&session_id).is_some();
        if removed {
            log::info!("session {} ended", session_id);
        }
        Ok(Response::new(EndGameResponse { removed }))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    let addr = config.addr;
    let service = BadatroService::new(config);

    println!("Badatro gRPC server listening on {}", addr);

    tonic::transport::Server::builder()
        .add_service(BadatroServer::new(service))
        .serve(addr)
        .await?;

    Ok(())
}
