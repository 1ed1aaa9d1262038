mod image;
mod prompt;
mod requester;

pub use image::{ImageMime, UploadedImage, decode_base64};
pub use prompt::{CLOSING_INSTRUCTION, PromptTemplate};
pub use requester::{Recommender, RecommenderSettings};
