pub(crate) mod gateway_single;
