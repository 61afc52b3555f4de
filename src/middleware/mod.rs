/*
 * Responsibility
 * - Public interface of the middleware layers
 */
pub mod http;
