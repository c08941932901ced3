//! Message Router
//!
//! 接続ごとのイベント（接続・切断・受信テキスト）を UseCase に振り分けます。
//! 受信テキストは `type` フィールドで判別し、知らない `type` や壊れた
//! JSON は debug ログだけ残して捨てます。

use std::sync::Arc;

use clicker_race_shared::time::Clock;
use thiserror::Error;

use crate::{
    config::GameConfig,
    domain::{ConnectionId, GameRepository, MessagePusher, Participant, PusherChannel},
    infrastructure::dto::websocket::{ClientMessage, requested_seconds},
    usecase::{
        BroadcastError, BroadcastService, ClickUseCase, ConnectError, ConnectParticipantUseCase,
        DisconnectParticipantUseCase, RoundController, SetNameUseCase,
    },
};

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("failed to deliver response: {0}")]
    Delivery(#[from] BroadcastError),
}

pub struct MessageRouter {
    connect_participant_usecase: ConnectParticipantUseCase,
    disconnect_participant_usecase: DisconnectParticipantUseCase,
    set_name_usecase: SetNameUseCase,
    click_usecase: ClickUseCase,
    round_controller: Arc<RoundController>,
    broadcaster: Arc<BroadcastService>,
}

impl MessageRouter {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        config: GameConfig,
    ) -> Self {
        let broadcaster = Arc::new(BroadcastService::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        Self {
            connect_participant_usecase: ConnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock,
            ),
            disconnect_participant_usecase: DisconnectParticipantUseCase::new(
                repository.clone(),
                message_pusher,
            ),
            set_name_usecase: SetNameUseCase::new(repository.clone()),
            click_usecase: ClickUseCase::new(repository.clone()),
            round_controller: Arc::new(RoundController::new(
                repository,
                broadcaster.clone(),
                config,
            )),
            broadcaster,
        }
    }

    /// 新しい接続を登録し、welcome と最新の state を送る
    pub async fn on_connect(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Participant, ConnectError> {
        let participant = self
            .connect_participant_usecase
            .execute(connection_id, sender)
            .await?;
        tracing::info!(
            "Participant '{}' joined as {}",
            participant.id,
            participant.name
        );

        if let Err(e) = self.broadcaster.send_welcome(&participant).await {
            tracing::warn!("Failed to welcome '{}': {}", participant.id, e);
        }
        if let Err(e) = self.broadcaster.broadcast_state().await {
            tracing::warn!("Failed to broadcast state after connect: {}", e);
        }
        Ok(participant)
    }

    /// 接続を登録から外し、残りの接続に state を送る
    ///
    /// 二度目以降の呼び出しは何もしない。
    pub async fn on_disconnect(&self, connection_id: &ConnectionId) {
        let Some(participant) = self
            .disconnect_participant_usecase
            .execute(connection_id)
            .await
        else {
            return;
        };
        tracing::info!(
            "Participant '{}' ({}) left, {} remaining",
            participant.id,
            participant.name,
            self.disconnect_participant_usecase
                .count_remaining_participants()
                .await
        );

        if let Err(e) = self.broadcaster.broadcast_state().await {
            tracing::warn!("Failed to broadcast state after disconnect: {}", e);
        }
    }

    /// 受信したテキストフレーム一つを処理する
    pub async fn route_text(
        &self,
        connection_id: &ConnectionId,
        text: &str,
    ) -> Result<(), RouteError> {
        match ClientMessage::parse(text) {
            Some(ClientMessage::Unrecognized) | None => {
                tracing::debug!("Dropped message from '{}': {}", connection_id, text);
                Ok(())
            }
            Some(message) => self.dispatch(connection_id, message).await,
        }
    }

    async fn dispatch(
        &self,
        connection_id: &ConnectionId,
        message: ClientMessage,
    ) -> Result<(), RouteError> {
        match message {
            ClientMessage::Click => {
                if self.click_usecase.execute(connection_id).await.is_some() {
                    self.broadcaster.broadcast_state().await?;
                }
            }
            ClientMessage::SetName { name } => {
                if let Some(applied) = self.set_name_usecase.execute(connection_id, &name).await {
                    tracing::debug!("'{}' is now {}", connection_id, applied);
                    self.broadcaster.broadcast_state().await?;
                }
            }
            ClientMessage::Start { duration } => {
                let requested = requested_seconds(duration.as_ref());
                match self.round_controller.start(requested).await {
                    Ok(applied) => {
                        self.broadcaster.broadcast_round_started(applied).await?;
                    }
                    Err(e) => {
                        tracing::debug!("Start from '{}' rejected: {}", connection_id, e);
                        self.broadcaster
                            .send_error(connection_id, &e.to_string())
                            .await?;
                    }
                }
            }
            ClientMessage::Unrecognized => {}
        }
        Ok(())
    }
}
