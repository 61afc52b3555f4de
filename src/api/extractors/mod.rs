/*!
 * Request extractors
 *
 * Public API:
 * - ForwardedIdentity
 */

mod forwarded_identity;

pub use forwarded_identity::ForwardedIdentity;
