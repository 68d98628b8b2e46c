pub mod predict;
pub mod retrain;
