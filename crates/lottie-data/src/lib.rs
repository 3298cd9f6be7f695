// lottie-data: Serde structs for the Lottie output of the exporter
pub mod model;
