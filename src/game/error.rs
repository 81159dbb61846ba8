use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("the selected piece cannot reach that square")]
    IllegalMove,
    #[error("it is not that player's turn")]
    WrongTurn,
    #[error("no promotion is pending, or the chosen piece is not a promotion")]
    InvalidPromotion,
    #[error("there is no move to take back")]
    TakebackUnavailable,
    #[error("remote move conflicts with the local position; match aborted")]
    InconsistentRemoteState,
}
