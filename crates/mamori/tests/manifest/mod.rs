mod dash;
mod hls;
