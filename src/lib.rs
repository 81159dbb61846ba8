pub mod board;
pub mod chess_move;
pub mod evaluate;
pub mod game;
pub mod modifiers;
pub mod move_generation;
pub mod net;
