//! 测试套件

pub mod campaigns;
pub mod delivery;
