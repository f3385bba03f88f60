mod pbe_roundtrip;
mod short_block_wrap;
mod wrap_roundtrip;
