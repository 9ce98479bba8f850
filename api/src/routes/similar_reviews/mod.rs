pub mod similar_reviews_request;
pub mod similar_reviews_response;
pub mod similar_reviews_route;
