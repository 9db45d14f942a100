//! Various items related to ID3v2 frames

mod attached_picture_frame;
mod binary_frame;
mod extended_text_frame;
mod extended_url_frame;
mod music_cd_identifier;
mod play_counter_frame;
mod popularimeter;
mod text_information_frame;
mod unique_file_identifier;
mod unsynchronized_text_frame;
mod url_link_frame;

pub use attached_picture_frame::AttachedPictureFrame;
pub use binary_frame::BinaryFrame;
pub use extended_text_frame::ExtendedTextFrame;
pub use extended_url_frame::ExtendedUrlFrame;
pub use music_cd_identifier::MusicCdIdentifierFrame;
pub use play_counter_frame::PlayCounterFrame;
pub use popularimeter::PopularimeterFrame;
pub use text_information_frame::TextInformationFrame;
pub use unique_file_identifier::UniqueFileIdentifierFrame;
pub use unsynchronized_text_frame::UnsynchronizedTextFrame;
pub use url_link_frame::UrlLinkFrame;
