pub mod persona;
pub mod run_debate;
pub mod run_tool_loop;
