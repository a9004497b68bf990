//! Photo discovery, track correlation and run orchestration.

mod coordinator;
mod correlator;
mod processor;

pub use coordinator::{collect_photo_files, is_photo_file, output_path};
pub use correlator::{
    Correlator, PhotoRecord, encode_thumbnail, place_nearest_time, place_random,
};
pub use processor::{RunOptions, RunSummary, build_map, process_run};
