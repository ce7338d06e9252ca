pub mod document_queries;
