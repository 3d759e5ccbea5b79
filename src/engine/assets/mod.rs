// Asset references
//
// The runner only needs to name the sound clips it asks the audio source to
// play. Decoding and mixing happen in whatever audio backend the host uses.

mod handle;

pub use handle::{AssetHandle, AssetId, SoundAsset, SoundHandle};
