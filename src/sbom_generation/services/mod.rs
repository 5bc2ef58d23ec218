mod component_merger;
mod document_assembler;
mod linker_output_parser;

pub use component_merger::ComponentMerger;
pub use document_assembler::{
    Clock, DocumentAssembler, RandomSerialSource, SerialSource, SystemClock, ROOT_QUALIFIER,
    TOOL_NAME,
};
pub use linker_output_parser::LinkerOutputParser;
