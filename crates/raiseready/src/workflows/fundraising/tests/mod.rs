mod common;
mod recommend;
mod routing;
