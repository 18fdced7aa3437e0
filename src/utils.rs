pub(crate) mod tracked;
