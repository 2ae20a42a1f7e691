// Vendor handler implementations.
//
// Each submodule provides one handler plus a `descriptor()` constructor
// for registry registration. Adding a vendor means adding a module here
// and one `register` call in `registry::builtin_registry` -- the
// pipeline itself never changes.

pub mod meraki;
