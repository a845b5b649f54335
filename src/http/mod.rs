//! HTTP response building module

pub mod response;

pub use response::{
    build_400_response, build_404_response, build_413_response, build_empty_500_response,
    build_empty_ok_response, build_html_response, build_plain_500_response,
};
